//! eidtext - Rich-text markup engine for in-game item descriptions
//!
//! This library provides functionality to:
//! - Resolve `{{shortcut}}` markup into inline icons and color changes
//! - Fit styled text to a pixel width using a fixed bitmap font
//! - Register descriptions and transformations per language with English fallback
//! - Load data packs (JSON5) and draw descriptions through a rendering sink

pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod crafting;
pub mod engine;
pub mod font;
pub mod layout;
pub mod logging;
pub mod markup;
pub mod models;
pub mod parser;
pub mod registry;
pub mod render;
pub mod tokenizer;

pub use engine::Eid;
