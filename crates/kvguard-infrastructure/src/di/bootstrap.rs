//! Composition root
//!
//! Resolves the configured store provider from the linkme registry and wires
//! it into the use cases.
//!
//! ```text
//! AppConfig → STORE_PROVIDERS registry → Arc<dyn StoreProvider>
//!                                              ↓
//!                     LockService / StockService / RateLimitService
//!                                              ↓
//!                                         GuardedCall
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?).await?;
//!
//! let outcome = context
//!     .guard()
//!     .with_lock("lock-key", context.default_lock_ttl(), || async { /* work */ })
//!     .await?;
//! ```

use crate::config::AppConfig;
use crate::error_ext::registry_error;
use crate::health::{HealthCheck, check_store};
use kvguard_application::ports::registry::resolve_store_provider;
use kvguard_application::{GuardedCall, KeySpace, LockService, RateLimitService, StockService};
use kvguard_domain::error::Result;
use kvguard_domain::ports::providers::StoreProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Application context holding the store and the services built on it
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    store: Arc<dyn StoreProvider>,
    locks: Arc<LockService>,
    stock: Arc<StockService>,
    limiter: Arc<RateLimitService>,
    guard: GuardedCall,
}

impl AppContext {
    /// Shared store provider
    pub fn store(&self) -> Arc<dyn StoreProvider> {
        Arc::clone(&self.store)
    }

    /// Lock manager
    pub fn locks(&self) -> Arc<LockService> {
        Arc::clone(&self.locks)
    }

    /// Bounded decrement service
    pub fn stock(&self) -> Arc<StockService> {
        Arc::clone(&self.stock)
    }

    /// Rate limiter with the declared policies
    pub fn limiter(&self) -> Arc<RateLimitService> {
        Arc::clone(&self.limiter)
    }

    /// Guarded-call wrapper
    pub fn guard(&self) -> &GuardedCall {
        &self.guard
    }

    /// Configured lock TTL
    pub fn default_lock_ttl(&self) -> Duration {
        self.config.lock.default_ttl()
    }

    /// Ping the store
    pub async fn health(&self) -> HealthCheck {
        check_store(self.store.as_ref()).await
    }
}

/// Initialize the application context from configuration
///
/// Resolves `config.store.provider` from the registry. Connection to a
/// remote store is lazy, so this only fails on store errors when stock has
/// to be seeded.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    let provider_config = config.store.provider_config();
    let store = resolve_store_provider(&provider_config)
        .map_err(|message| registry_error(&provider_config.provider, message))?;

    info!(
        provider = store.provider_name(),
        key_prefix = %config.store.key_prefix,
        "store provider resolved"
    );

    init_app_with_store(config, store).await
}

/// Initialize the application context around an existing store
pub async fn init_app_with_store(
    config: AppConfig,
    store: Arc<dyn StoreProvider>,
) -> Result<AppContext> {
    let keys = KeySpace::new(config.store.key_prefix.clone());

    let locks = Arc::new(LockService::new(Arc::clone(&store), keys.clone()));
    let stock = Arc::new(StockService::new(Arc::clone(&store), keys.clone()));
    let limiter = Arc::new(
        RateLimitService::new(Arc::clone(&store), keys).with_policies(config.rate_limit_policies())?,
    );
    let guard = GuardedCall::new(Arc::clone(&locks), Arc::clone(&limiter));

    for (resource, quantity) in &config.stock.initial {
        stock.initialize(resource, *quantity).await?;
    }

    info!(
        rate_limits = config.rate_limits.len(),
        seeded_resources = config.stock.initial.len(),
        "application context initialized"
    );

    Ok(AppContext {
        config: Arc::new(config),
        store,
        locks,
        stock,
        limiter,
        guard,
    })
}
