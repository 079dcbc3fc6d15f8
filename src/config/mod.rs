//! Configuration module for the description engine
//!
//! Provides types, discovery and loading for `eid.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
