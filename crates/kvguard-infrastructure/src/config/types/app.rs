//! Application configuration root

use super::{LockConfig, LoggingConfig, RateLimitConfig, StockConfig, StoreConfig};
use kvguard_domain::value_objects::RateLimitPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shared store connection
    pub store: StoreConfig,

    /// Lock defaults
    pub lock: LockConfig,

    /// Declared rate limits, keyed by operation name
    pub rate_limits: BTreeMap<String, RateLimitConfig>,

    /// Countable resources seeded at startup
    pub stock: StockConfig,

    /// Logging
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Declared rate limits as policies
    pub fn rate_limit_policies(&self) -> Vec<RateLimitPolicy> {
        self.rate_limits
            .iter()
            .map(|(operation, limit)| limit.to_policy(operation))
            .collect()
    }
}
