//! In-memory store provider
//!
//! Single-process implementation of the store port on a sharded concurrent
//! map. Every atomic contract runs inside one `entry()` call, which holds the
//! shard lock of the key for the whole read-decide-write step. Expired
//! records are treated as absent on access and dropped lazily.
//!
//! Expiry uses `tokio::time::Instant`, so tests can drive TTLs with a paused
//! clock.
//!
//! ## Example
//!
//! ```ignore
//! use kvguard_providers::store::MemoryStoreProvider;
//!
//! let store = MemoryStoreProvider::new();
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use kvguard_domain::constants::{INSUFFICIENT_SENTINEL, NOT_OWNER, RELEASED};
use kvguard_domain::error::{Error, Result};
use kvguard_domain::ports::providers::{StoreProvider, StoreScript};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Record {
    value: String,
    expires_at: Option<Instant>,
}

impl Record {
    fn new(value: String, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            value,
            // An expiry past the clock's range never fires
            expires_at: ttl.and_then(|ttl| now.checked_add(ttl)),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }

    fn integer(&self, key: &str) -> Result<i64> {
        self.value.parse::<i64>().map_err(|_| {
            Error::store(format!(
                "value at '{key}' is not an integer or out of range"
            ))
        })
    }
}

/// In-memory store provider
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreProvider {
    records: Arc<DashMap<String, Record>>,
}

impl MemoryStoreProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.records.iter().filter(|r| r.is_live(now)).count()
    }

    /// True when no live record exists
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired record, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.records.len();
        self.records.retain(|_, record| record.is_live(now));
        before.saturating_sub(self.records.len())
    }

    /// Remaining time to live of a record
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let record = self.records.get(key)?;
        if !record.is_live(now) {
            return None;
        }
        record.expires_at.map(|at| at.saturating_duration_since(now))
    }

    fn compare_and_delete(&self, key: &str, expected: &str) -> i64 {
        let now = Instant::now();
        match self.records.entry(key.to_string()) {
            Entry::Occupied(entry) if entry.get().is_live(now) && entry.get().value == expected => {
                entry.remove();
                RELEASED
            }
            Entry::Occupied(entry) if !entry.get().is_live(now) => {
                entry.remove();
                NOT_OWNER
            }
            _ => NOT_OWNER,
        }
    }

    fn bounded_decrement(&self, key: &str, amount: i64) -> Result<i64> {
        let now = Instant::now();
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut entry) if entry.get().is_live(now) => {
                let current = entry.get().integer(key)?;
                if current < amount {
                    return Ok(INSUFFICIENT_SENTINEL);
                }
                let remaining = current - amount;
                entry.get_mut().value = remaining.to_string();
                Ok(remaining)
            }
            // A missing record holds zero, and zero never covers a positive amount
            _ if amount > 0 => Ok(INSUFFICIENT_SENTINEL),
            _ => Ok(0),
        }
    }

    fn increment_with_expiry(&self, key: &str, window: Duration) -> Result<i64> {
        let now = Instant::now();
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut entry) if entry.get().is_live(now) => {
                let next = entry
                    .get()
                    .integer(key)?
                    .checked_add(1)
                    .ok_or_else(|| Error::store(format!("increment of '{key}' overflows")))?;
                entry.get_mut().value = next.to_string();
                Ok(next)
            }
            Entry::Occupied(mut entry) => {
                entry.insert(Record::new("1".to_string(), Some(window), now));
                Ok(1)
            }
            Entry::Vacant(entry) => {
                entry.insert(Record::new("1".to_string(), Some(window), now));
                Ok(1)
            }
        }
    }
}

fn single_key<'a>(
    script: StoreScript,
    keys: &[&'a str],
    args: &'a [String],
) -> Result<(&'a str, &'a str)> {
    match (keys, args) {
        ([key], [arg]) => Ok((*key, arg.as_str())),
        _ => Err(Error::store(format!(
            "{script} expects 1 key and 1 argument, got {} and {}",
            keys.len(),
            args.len()
        ))),
    }
}

fn integer_arg(script: StoreScript, raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| Error::store(format!("{script} argument '{raw}' is not an integer")))
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        {
            let Some(record) = self.records.get(key) else {
                return Ok(None);
            };
            if record.is_live(now) {
                return Ok(Some(record.value.clone()));
            }
        }
        self.records.remove_if(key, |_, record| !record.is_live(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let record = Record::new(value.to_string(), ttl, Instant::now());
        self.records.insert(key.to_string(), record);
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let now = Instant::now();
        let record = Record::new(value.to_string(), Some(ttl), now);
        match self.records.entry(key.to_string()) {
            Entry::Occupied(entry) if entry.get().is_live(now) => Ok(false),
            Entry::Occupied(mut entry) => {
                entry.insert(record);
                Ok(true)
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(true)
            }
        }
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        let now = Instant::now();
        let removed = keys
            .iter()
            .filter_map(|key| self.records.remove(key))
            .filter(|(_, record)| record.is_live(now))
            .count();
        Ok(removed as u64)
    }

    async fn increment(&self, key: &str, delta: i64) -> Result<i64> {
        let now = Instant::now();
        let overflow = || Error::store(format!("increment of '{key}' overflows"));
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut entry) if entry.get().is_live(now) => {
                let next = entry
                    .get()
                    .integer(key)?
                    .checked_add(delta)
                    .ok_or_else(overflow)?;
                entry.get_mut().value = next.to_string();
                Ok(next)
            }
            Entry::Occupied(mut entry) => {
                entry.insert(Record::new(delta.to_string(), None, now));
                Ok(delta)
            }
            Entry::Vacant(entry) => {
                entry.insert(Record::new(delta.to_string(), None, now));
                Ok(delta)
            }
        }
    }

    async fn run_script(&self, script: StoreScript, keys: &[&str], args: &[String]) -> Result<i64> {
        let (key, arg) = single_key(script, keys, args)?;
        match script {
            StoreScript::CompareAndDelete => Ok(self.compare_and_delete(key, arg)),
            StoreScript::BoundedDecrement => {
                self.bounded_decrement(key, integer_arg(script, arg)?)
            }
            StoreScript::IncrementWithExpiry => {
                let millis = u64::try_from(integer_arg(script, arg)?)
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| Error::store(format!("{script} window must be positive")))?;
                self.increment_with_expiry(key, Duration::from_millis(millis))
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use kvguard_application::ports::registry::{
    STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry,
};

/// Factory function for creating memory store provider instances.
fn memory_store_factory(
    _config: &StoreProviderConfig,
) -> std::result::Result<Arc<dyn StoreProvider>, String> {
    Ok(Arc::new(MemoryStoreProvider::new()))
}

#[linkme::distributed_slice(STORE_PROVIDERS)]
static MEMORY_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "memory",
    description: "In-process store (single process only)",
    factory: memory_store_factory,
};
