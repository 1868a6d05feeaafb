//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | StoreProvider | Shared key-value store with atomic single commands and atomic scripts |

/// Key-value store provider port
pub mod store;

pub use store::{StoreProvider, StoreScript};
