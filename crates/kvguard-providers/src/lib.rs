//! # kvguard - Store Provider Implementations
//!
//! Each provider implements the `StoreProvider` port defined in
//! `kvguard-domain` and registers itself in the `STORE_PROVIDERS` registry of
//! `kvguard-application`.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | [`store::RedisStoreProvider`] | `store-redis` | Redis, atomic contracts as Lua scripts |
//! | [`store::MemoryStoreProvider`] | `store-memory` | In-process map, atomic contracts under per-key shard locks |
//!
//! ```toml
//! [dependencies]
//! kvguard-providers = { version = "0.1", default-features = false, features = ["store-memory"] }
//! ```

// Re-export kvguard-domain types commonly used with providers
pub use kvguard_domain::error::{Error, Result};
pub use kvguard_domain::ports::providers::{StoreProvider, StoreScript};

/// Provider-specific constants
pub mod constants;

/// Store provider implementations
pub mod store;
