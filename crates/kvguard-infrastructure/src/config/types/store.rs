//! Store configuration types

use crate::constants::DEFAULT_STORE_PROVIDER;
use kvguard_application::ports::registry::StoreProviderConfig;
use kvguard_domain::constants::DEFAULT_KEY_PREFIX;
use kvguard_providers::constants::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REDIS_URI};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Shared store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StoreConfig {
    /// Registered provider name ("redis", "memory")
    #[validate(length(min = 1))]
    pub provider: String,

    /// Connection URI (Redis)
    pub uri: Option<String>,

    /// Connection establishment timeout in milliseconds
    #[validate(range(min = 1))]
    pub connect_timeout_ms: u64,

    /// Prefix of every key kvguard writes; empty writes bare keys
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_STORE_PROVIDER.to_string(),
            uri: Some(DEFAULT_REDIS_URI.to_string()),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl StoreConfig {
    /// Registry configuration for the store provider
    pub fn provider_config(&self) -> StoreProviderConfig {
        let config = StoreProviderConfig::new(&self.provider)
            .with_connect_timeout_ms(self.connect_timeout_ms);
        match &self.uri {
            Some(uri) => config.with_uri(uri),
            None => config,
        }
    }
}
