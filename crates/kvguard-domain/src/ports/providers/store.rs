//! Store Provider Port
//!
//! Port for the shared key-value store every primitive coordinates through.
//! A provider must execute each single command atomically and must execute a
//! [`StoreScript`] as one indivisible step relative to all other clients.
//!
//! ## Implementations
//!
//! - **Redis**: Lua scripts via `EVALSHA`, for multi-process deployments
//! - **Memory**: per-key atomic sections in a concurrent map, for a single process and tests

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Atomic read-decide-write contracts a store must provide
///
/// The script language is a provider detail. Each variant fixes the keys,
/// arguments and integer result a provider must honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreScript {
    /// Keys: `[key]`, args: `[expected]`.
    ///
    /// Deletes the key and returns 1 if its value equals `expected`,
    /// otherwise returns 0 and changes nothing.
    CompareAndDelete,
    /// Keys: `[key]`, args: `[n]`.
    ///
    /// If the stored integer is `>= n`, decrements it by `n` and returns the
    /// new value; otherwise returns -1 and changes nothing. A missing key
    /// counts as zero.
    BoundedDecrement,
    /// Keys: `[key]`, args: `[window_millis]`.
    ///
    /// Increments the key; when the result is 1 sets its expiry to
    /// `window_millis`. Returns the post-increment value.
    IncrementWithExpiry,
}

impl StoreScript {
    /// Stable name used in logs and errors
    pub fn name(self) -> &'static str {
        match self {
            Self::CompareAndDelete => "compare_and_delete",
            Self::BoundedDecrement => "bounded_decrement",
            Self::IncrementWithExpiry => "increment_with_expiry",
        }
    }
}

impl fmt::Display for StoreScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Store Provider Port
///
/// Every method is a single round trip. Providers never retry and never turn
/// a transport failure into a regular value: failures surface as
/// `Error::Store`.
#[async_trait]
pub trait StoreProvider: Send + Sync + fmt::Debug {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value unconditionally, with an optional expiry
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Write a value with expiry only if no record exists
    ///
    /// # Returns
    /// True if the record was created
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// Delete keys
    ///
    /// # Returns
    /// Number of records removed
    async fn delete(&self, keys: &[String]) -> Result<u64>;

    /// Add `delta` to an integer record, creating it at zero
    async fn increment(&self, key: &str, delta: i64) -> Result<i64>;

    /// Execute one of the atomic script contracts
    async fn run_script(&self, script: StoreScript, keys: &[&str], args: &[String]) -> Result<i64>;

    /// Check the store is reachable
    async fn ping(&self) -> Result<()>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
