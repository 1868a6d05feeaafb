//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the kvguard primitives.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, `KVGUARD_` environment |
//! | [`logging`] | Structured logging with tracing |
//! | [`health`] | Store reachability check |
//! | [`di`] | Composition root wiring the store into the use cases |
//! | [`constants`] | Centralized configuration constants |

// Store providers register through linkme; keep them linked
extern crate kvguard_providers;

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod health;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, init_app, init_app_with_store};
pub use error_ext::ErrorContext;
