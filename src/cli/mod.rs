//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod describe;
mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, resolve_path, CliOverrides, EidConfig};
use crate::crafting::{table_to_crafting_icons_full, table_to_crafting_icons_merged};
use crate::engine::Eid;
use crate::logging;
use crate::models::EntityClass;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// eid - Render item descriptions with inline icon and color markup
#[derive(Parser)]
#[command(name = "eid")]
#[command(about = "Resolve {{markup}}, fit descriptions to a text box and print them to the terminal")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to eid.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data pack files or glob patterns (repeatable)
    #[arg(short, long = "pack", global = true)]
    pub packs: Vec<String>,

    /// Description language
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Text box width in pixels
    #[arg(short, long, global = true)]
    pub width: Option<u32>,

    /// Abort on the first bad pack object
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable ANSI colors even on a terminal
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Description table selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassArg {
    Collectible,
    Trinket,
    Card,
    Pill,
    Birthright,
    Entity,
}

impl From<ClassArg> for EntityClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Collectible => EntityClass::Collectible,
            ClassArg::Trinket => EntityClass::Trinket,
            ClassArg::Card => EntityClass::Card,
            ClassArg::Pill => EntityClass::Pill,
            ClassArg::Birthright => EntityClass::Birthright,
            ClassArg::Entity => EntityClass::Entity,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve markup, fit it to the text box and print it
    Render {
        /// Text to render (reads stdin when omitted)
        text: Option<String>,

        /// Print fitted lines as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the description of an item or entity
    Describe {
        /// Description table
        #[arg(value_enum)]
        class: ClassArg,

        /// Numeric id, or "type.variant.subtype" for entities
        id: String,

        /// Print the description object as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print each fitted line as markup
    Fit {
        /// Text to fit (reads stdin when omitted)
        text: Option<String>,
    },

    /// Print the rendered pixel width of a string
    Width {
        /// Text to measure (reads stdin when omitted)
        text: Option<String>,
    },

    /// Encode crafting ingredient values as icon markup
    Crafting {
        /// Ingredient values (1-8)
        #[arg(required = true, value_parser = clap::value_parser!(u32).range(1..=8))]
        values: Vec<u32>,

        /// One icon per ingredient instead of grouped counts
        #[arg(long)]
        full: bool,
    },
}

/// Execute the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    if let Commands::Crafting { values, full } = &cli.command {
        let encoded = if *full {
            table_to_crafting_icons_full(values)
        } else {
            table_to_crafting_icons_merged(values)
        };
        println!("{}", encoded);
        return ExitCode::from(EXIT_SUCCESS);
    }

    let eid = match build_engine(&cli.global) {
        Ok(eid) => eid,
        Err(code) => return code,
    };
    let color = !cli.global.no_color && atty::is(atty::Stream::Stdout);

    match cli.command {
        Commands::Render { text, json } => match input_text(text) {
            Ok(text) => render::run_render(&eid, &text, json, color),
            Err(code) => code,
        },
        Commands::Fit { text } => match input_text(text) {
            Ok(text) => render::run_fit(&eid, &text),
            Err(code) => code,
        },
        Commands::Width { text } => match input_text(text) {
            Ok(text) => render::run_width(&eid, &text),
            Err(code) => code,
        },
        Commands::Describe { class, id, json } => describe::run_describe(eid, class.into(), &id, json, color),
        Commands::Crafting { .. } => ExitCode::from(EXIT_SUCCESS),
    }
}

/// Text from the argument, or all of stdin.
fn input_text(text: Option<String>) -> Result<String, ExitCode> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buf = String::new();
    match std::io::stdin().read_to_string(&mut buf) {
        Ok(_) => Ok(buf.trim_end_matches('\n').to_string()),
        Err(e) => {
            eprintln!("Error: Cannot read stdin: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Load configuration and data packs into a fresh engine.
fn build_engine(args: &GlobalArgs) -> Result<Eid, ExitCode> {
    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    let overrides = CliOverrides {
        width: args.width,
        language: args.language.clone(),
        strict: args.strict.then_some(true),
        ..Default::default()
    };
    merge_cli_overrides(&mut config, &overrides);

    let theme = match config.colors.theme() {
        Ok(theme) => theme,
        Err(e) => {
            eprintln!("Error: Invalid theme color: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    let mut eid = Eid::with_settings(config.display.to_settings(), theme);

    for path in pack_files(args, &config)? {
        load_pack_file(&mut eid, &path, config.packs.strict)?;
    }
    Ok(eid)
}

/// Expand pack patterns from the config (relative to it) and the command line.
fn pack_files(args: &GlobalArgs, config: &EidConfig) -> Result<Vec<PathBuf>, ExitCode> {
    let config_path = args.config.clone().or_else(crate::config::find_config);
    let mut patterns: Vec<String> = config
        .packs
        .include
        .iter()
        .map(|p| match &config_path {
            Some(cfg) => resolve_path(cfg, Path::new(p)).display().to_string(),
            None => p.clone(),
        })
        .collect();
    patterns.extend(args.packs.iter().cloned());

    let mut files = Vec::new();
    for pattern in &patterns {
        let paths = match glob(pattern) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Error: Invalid pack pattern '{}': {}", pattern, e);
                return Err(ExitCode::from(EXIT_INVALID_ARGS));
            }
        };
        let before = files.len();
        files.extend(paths.filter_map(Result::ok));
        if files.len() == before {
            eprintln!("Warning: No pack files match '{}'", pattern);
        }
    }
    Ok(files)
}

fn load_pack_file(eid: &mut Eid, path: &Path, strict: bool) -> Result<(), ExitCode> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: Cannot open pack '{}': {}", path.display(), e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    match eid.load_pack_reader(BufReader::new(file), strict) {
        Ok(warnings) => {
            for warning in warnings {
                eprintln!("Warning: {}: {}", path.display(), warning);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}: {}", path.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}
