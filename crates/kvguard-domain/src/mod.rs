//! # kvguard Domain Layer
//!
//! Core types shared by every other crate in the workspace:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy (contract violations, store failures, rejections) |
//! | [`value_objects`] | Lock leases, admission outcomes, rate limit policies |
//! | [`ports`] | The `StoreProvider` port and the atomic script contracts |
//! | [`constants`] | Key namespaces and default values |
//!
//! The domain holds no state of its own. All coordination state lives in an
//! external key-value store reached through [`ports::providers::StoreProvider`].

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::providers::{StoreProvider, StoreScript};
pub use value_objects::*;
