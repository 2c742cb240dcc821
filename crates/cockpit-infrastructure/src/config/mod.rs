//! Configuration management
//!
//! Layered loading with figment: defaults, TOML file, `COCKPIT_` environment.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
