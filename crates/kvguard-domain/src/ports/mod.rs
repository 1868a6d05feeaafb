//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the providers crate.
//!
//! - **providers/** - External store provider ports

/// External service provider ports
pub mod providers;

pub use providers::{StoreProvider, StoreScript};
