//! Store Provider Registry
//!
//! Providers register themselves via `linkme::distributed_slice` and are
//! discovered at runtime by name.

use std::sync::Arc;

use kvguard_domain::ports::providers::StoreProvider;

/// Configuration for store provider creation
///
/// Providers use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct StoreProviderConfig {
    /// Provider name (e.g., "redis", "memory")
    pub provider: String,
    /// Connection URI (for remote stores)
    pub uri: Option<String>,
    /// Connection establishment timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
}

impl StoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the connection timeout in milliseconds
    pub fn with_connect_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.connect_timeout_ms = Some(timeout_ms);
        self
    }
}

/// Registry entry for store providers
pub struct StoreProviderEntry {
    /// Unique provider name (e.g., "redis", "memory")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&StoreProviderConfig) -> Result<Arc<dyn StoreProvider>, String>,
}

#[linkme::distributed_slice]
pub static STORE_PROVIDERS: [StoreProviderEntry] = [..];

/// Resolve store provider by name from registry
///
/// # Returns
/// * `Ok(Arc<dyn StoreProvider>)` - Created provider instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_store_provider(
    config: &StoreProviderConfig,
) -> Result<Arc<dyn StoreProvider>, String> {
    if let Some(entry) = STORE_PROVIDERS.iter().find(|e| e.name == config.provider) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = STORE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown store provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered store providers as (name, description) tuples
pub fn list_store_providers() -> Vec<(&'static str, &'static str)> {
    STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
