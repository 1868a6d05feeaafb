//! Shared fixtures

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kvguard_application::{GuardedCall, KeySpace, LockService, RateLimitService, StockService};
use kvguard_domain::error::{Error, Result};
use kvguard_domain::ports::providers::{StoreProvider, StoreScript};
use kvguard_providers::store::MemoryStoreProvider;

/// Services wired to one in-memory store
pub struct Fixture {
    pub store: Arc<MemoryStoreProvider>,
    pub locks: Arc<LockService>,
    pub stock: Arc<StockService>,
    pub limiter: Arc<RateLimitService>,
    pub guard: GuardedCall,
}

pub fn fixture() -> Fixture {
    let store = Arc::new(MemoryStoreProvider::new());
    let (locks, stock, limiter, guard) = services(store.clone());
    Fixture {
        store,
        locks,
        stock,
        limiter,
        guard,
    }
}

pub fn services(
    store: Arc<dyn StoreProvider>,
) -> (
    Arc<LockService>,
    Arc<StockService>,
    Arc<RateLimitService>,
    GuardedCall,
) {
    let keys = KeySpace::new("test");
    let locks = Arc::new(LockService::new(Arc::clone(&store), keys.clone()));
    let stock = Arc::new(StockService::new(Arc::clone(&store), keys.clone()));
    let limiter = Arc::new(RateLimitService::new(store, keys));
    let guard = GuardedCall::new(Arc::clone(&locks), Arc::clone(&limiter));
    (locks, stock, limiter, guard)
}

/// Store whose every call fails as if the server were unreachable
#[derive(Debug, Default)]
pub struct UnreachableStore;

fn down() -> Error {
    Error::store("connection refused")
}

#[async_trait]
impl StoreProvider for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(down())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        Err(down())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<bool> {
        Err(down())
    }

    async fn delete(&self, _keys: &[String]) -> Result<u64> {
        Err(down())
    }

    async fn increment(&self, _key: &str, _delta: i64) -> Result<i64> {
        Err(down())
    }

    async fn run_script(&self, _script: StoreScript, _keys: &[&str], _args: &[String]) -> Result<i64> {
        Err(down())
    }

    async fn ping(&self) -> Result<()> {
        Err(down())
    }

    fn provider_name(&self) -> &str {
        "unreachable"
    }
}

/// Store whose scripts return a fixed, out-of-contract value
#[derive(Debug)]
pub struct MisbehavingStore(pub i64);

#[async_trait]
impl StoreProvider for MisbehavingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(Some("not a number".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        Ok(())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<bool> {
        Ok(true)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        Ok(keys.len() as u64)
    }

    async fn increment(&self, _key: &str, delta: i64) -> Result<i64> {
        Ok(delta)
    }

    async fn run_script(&self, _script: StoreScript, _keys: &[&str], _args: &[String]) -> Result<i64> {
        Ok(self.0)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "misbehaving"
    }
}
