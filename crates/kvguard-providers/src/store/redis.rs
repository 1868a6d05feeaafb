//! Redis store provider
//!
//! Shared store for multi-process deployments. Single commands map to Redis
//! commands (`SET NX PX` for the lock, `INCRBY`, `DEL`); the atomic contracts
//! are Lua scripts, which Redis runs to completion before serving any other
//! client.
//!
//! ## Features
//!
//! - One lazily created `ConnectionManager`, shared by clones and reconnecting on failure
//! - Bounded connection establishment
//! - Scripts sent by SHA with automatic `SCRIPT LOAD` fallback
//!
//! ## Example
//!
//! ```ignore
//! use kvguard_providers::store::RedisStoreProvider;
//!
//! let provider = RedisStoreProvider::new("redis://localhost:6379")?;
//! // Or with host/port
//! let provider = RedisStoreProvider::with_host_port("localhost", 6379)?;
//! ```

use async_trait::async_trait;
use kvguard_domain::error::{Error, Result};
use kvguard_domain::ports::providers::{StoreProvider, StoreScript};
use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, Client, Script};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::timeout;

use crate::constants::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REDIS_URI};

/// Returns 1 and deletes KEYS[1] when it holds ARGV[1], else 0.
const COMPARE_AND_DELETE_LUA: &str = r"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
";

/// Decrements KEYS[1] by ARGV[1] when enough is left and returns the rest, else -1.
const BOUNDED_DECREMENT_LUA: &str = r"
local current = tonumber(redis.call('GET', KEYS[1]) or '0')
if current == nil then
    return redis.error_reply('stock record is not an integer')
end
local amount = tonumber(ARGV[1])
if current >= amount then
    return redis.call('DECRBY', KEYS[1], amount)
end
return -1
";

/// Increments KEYS[1]; the first increment of a window sets a PEXPIRE of ARGV[1].
const INCREMENT_WITH_EXPIRY_LUA: &str = r"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return current
";

#[derive(Clone)]
struct Scripts {
    compare_and_delete: Script,
    bounded_decrement: Script,
    increment_with_expiry: Script,
}

impl Scripts {
    fn new() -> Self {
        Self {
            compare_and_delete: Script::new(COMPARE_AND_DELETE_LUA),
            bounded_decrement: Script::new(BOUNDED_DECREMENT_LUA),
            increment_with_expiry: Script::new(INCREMENT_WITH_EXPIRY_LUA),
        }
    }

    fn get(&self, script: StoreScript) -> &Script {
        match script {
            StoreScript::CompareAndDelete => &self.compare_and_delete,
            StoreScript::BoundedDecrement => &self.bounded_decrement,
            StoreScript::IncrementWithExpiry => &self.increment_with_expiry,
        }
    }
}

/// Redis store provider
#[derive(Clone)]
pub struct RedisStoreProvider {
    client: Client,
    address: String,
    connection: Arc<OnceCell<ConnectionManager>>,
    connect_timeout: Duration,
    scripts: Scripts,
}

impl RedisStoreProvider {
    /// Create a new Redis store provider with connection string
    ///
    /// No connection is made until the first command.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::store_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        Ok(Self {
            client,
            address: connection_string.to_string(),
            connection: Arc::new(OnceCell::new()),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            scripts: Scripts::new(),
        })
    }

    /// Create a new Redis store provider with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Bound connection establishment
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Get the Redis server address description
    pub fn server_address(&self) -> &str {
        &self.address
    }

    /// Get the shared connection, establishing it on first use
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                tracing::info!("[STORE] Connecting to Redis at {}", self.server_address());
                timeout(self.connect_timeout, ConnectionManager::new(self.client.clone()))
                    .await
                    .map_err(|_| {
                        Error::store(format!(
                            "redis connection timeout: failed to connect within {}ms. \
                             check redis server availability",
                            self.connect_timeout.as_millis()
                        ))
                    })?
                    .map_err(|e| {
                        Error::store_with_source(
                            format!("failed to establish redis connection: {e}"),
                            e,
                        )
                    })
            })
            .await?;
        Ok(manager.clone())
    }
}

fn command_error(command: &str, key: &str, e: ::redis::RedisError) -> Error {
    tracing::warn!("[STORE] Redis {} failed for {}: {}", command, key, e);
    Error::store_with_source(format!("Redis {command} failed: {e}"), e)
}

fn millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl StoreProvider for RedisStoreProvider {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| command_error("GET", key, e))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;
        let mut cmd = ::redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("PX").arg(millis(ttl));
        }
        cmd.query_async::<()>(&mut conn)
            .await
            .map_err(|e| command_error("SET", key, e))
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;
        let reply: Option<String> = ::redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|e| command_error("SET NX", key, e))?;
        Ok(reply.is_some())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        ::redis::cmd("DEL")
            .arg(keys)
            .query_async::<u64>(&mut conn)
            .await
            .map_err(|e| command_error("DEL", &keys.join(","), e))
    }

    async fn increment(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.connection().await?;
        ::redis::cmd("INCRBY")
            .arg(key)
            .arg(delta)
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| command_error("INCRBY", key, e))
    }

    async fn run_script(&self, script: StoreScript, keys: &[&str], args: &[String]) -> Result<i64> {
        let mut conn = self.connection().await?;
        let mut invocation = self.scripts.get(script).prepare_invoke();
        for key in keys {
            invocation.key(*key);
        }
        for arg in args {
            invocation.arg(arg);
        }
        invocation
            .invoke_async::<i64>(&mut conn)
            .await
            .map_err(|e| command_error(script.name(), &keys.join(","), e))
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let pong: String = ::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| command_error("PING", "-", e))?;

        if pong != "PONG" {
            return Err(Error::store(format!("redis ping returned {pong}")));
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisStoreProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStoreProvider")
            .field("server", &self.server_address())
            .field("connected", &self.connection.initialized())
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use kvguard_application::ports::registry::{
    STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry,
};

/// Factory function for creating Redis store provider instances.
fn redis_store_factory(
    config: &StoreProviderConfig,
) -> std::result::Result<Arc<dyn StoreProvider>, String> {
    let uri = config.uri.as_deref().unwrap_or(DEFAULT_REDIS_URI);
    let timeout_ms = config
        .connect_timeout_ms
        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS);

    let provider = RedisStoreProvider::new(uri)
        .map_err(|e| format!("Failed to create Redis provider: {e}"))?
        .with_connect_timeout(Duration::from_millis(timeout_ms));

    Ok(Arc::new(provider))
}

#[linkme::distributed_slice(STORE_PROVIDERS)]
static REDIS_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "redis",
    description: "Redis shared store (Lua scripts for atomic contracts)",
    factory: redis_store_factory,
};
