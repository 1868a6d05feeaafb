//! Store Provider Implementations
//!
//! ## Provider Selection Guide
//!
//! - **Single process / tests**: `MemoryStoreProvider`
//! - **Multiple processes**: `RedisStoreProvider`; only a shared store gives
//!   exclusion and limits across processes

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;

#[cfg(feature = "store-memory")]
pub use self::memory::MemoryStoreProvider;
#[cfg(feature = "store-redis")]
pub use self::redis::RedisStoreProvider;
