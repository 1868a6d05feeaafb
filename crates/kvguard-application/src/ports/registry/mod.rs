//! Provider Registry System
//!
//! Uses the `linkme` crate for compile-time registration of store providers
//! that can be discovered and instantiated at runtime.
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(STORE_PROVIDERS)]
//!                       static ENTRY: StoreProviderEntry = ...
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static STORE_PROVIDERS: [StoreProviderEntry] = [..]
//! 3. Resolver queries:  STORE_PROVIDERS.iter()
//! 4. Config selects:    "provider = redis" → RedisStoreProvider
//! ```

pub mod store;

pub use store::{
    STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry, list_store_providers,
    resolve_store_provider,
};
