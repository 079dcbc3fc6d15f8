//! Render, fit and width commands

use std::process::ExitCode;

use crate::engine::Eid;
use crate::render::{render_lines, AnsiSink, Vector};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Fit `text` to the configured width and print it.
pub fn run_render(eid: &Eid, text: &str, json: bool, color: bool) -> ExitCode {
    let lines = eid.fit_lines(text, eid.settings.width, eid.theme.text);

    if json {
        let markup: Vec<&str> = lines.iter().map(|l| l.markup.as_str()).collect();
        return match serde_json::to_string_pretty(&markup) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: Cannot serialize lines: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let mut sink = AnsiSink::new(color);
    render_lines(&mut sink, &lines, Vector::default(), 1.0, eid.settings.line_height, eid.theme.text);
    print!("{}", sink.finish());
    ExitCode::from(EXIT_SUCCESS)
}

pub fn run_fit(eid: &Eid, text: &str) -> ExitCode {
    for line in eid.fit_text_to_width(text, eid.settings.width) {
        println!("{}", line);
    }
    ExitCode::from(EXIT_SUCCESS)
}

pub fn run_width(eid: &Eid, text: &str) -> ExitCode {
    println!("{}", eid.get_str_width(text));
    ExitCode::from(EXIT_SUCCESS)
}
