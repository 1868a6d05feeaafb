//! Application ports
//!
//! - **registry/** - Compile-time registration of store providers

pub mod registry;

pub use registry::*;
