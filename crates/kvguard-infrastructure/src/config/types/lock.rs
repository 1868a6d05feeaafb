//! Lock configuration types

use kvguard_domain::constants::{DEFAULT_LOCK_TTL_SECS, MAX_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Lock defaults
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LockConfig {
    /// TTL of a lock when the caller does not pass one
    #[validate(range(min = 1, max = MAX_TTL_SECS))]
    pub default_ttl_secs: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_LOCK_TTL_SECS,
        }
    }
}

impl LockConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}
