//! Configuration management
//!
//! Layered with figment: built-in defaults, then a TOML file, then
//! `KVGUARD_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
