//! Health checks
//!
//! A single check today: the shared store answers a ping within the
//! provider's connect timeout.

use crate::constants::STORE_HEALTH_CHECK;
use crate::logging::log_health_check;
use kvguard_domain::ports::providers::StoreProvider;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy and fully operational
    Up,
    /// Service is down and not operational
    Down,
}

impl HealthStatus {
    /// Check if the status indicates the service is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Name of the health check
    pub name: String,
    /// Store provider that was checked
    pub provider: String,
    /// Current status
    pub status: HealthStatus,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Error message when down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ping the store and report the outcome
pub async fn check_store(store: &dyn StoreProvider) -> HealthCheck {
    let started = Instant::now();
    let result = store.ping().await;
    let response_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (status, error) = match result {
        Ok(()) => (HealthStatus::Up, None),
        Err(e) => (HealthStatus::Down, Some(e.to_string())),
    };
    log_health_check(STORE_HEALTH_CHECK, status.is_healthy(), error.as_deref());

    HealthCheck {
        name: STORE_HEALTH_CHECK.to_string(),
        provider: store.provider_name().to_string(),
        status,
        response_time_ms,
        error,
    }
}
