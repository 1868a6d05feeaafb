//! Rate limit declarations
//!
//! ```toml
//! [rate_limits.login]
//! window_secs = 60
//! max_count = 5
//! ```

use kvguard_domain::constants::MAX_TTL_SECS;
use kvguard_domain::value_objects::RateLimitPolicy;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One declared fixed-window limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RateLimitConfig {
    /// Window length in seconds
    #[validate(range(min = 1, max = MAX_TTL_SECS))]
    pub window_secs: u64,

    /// Calls admitted per window and key
    #[validate(range(min = 1))]
    pub max_count: u32,
}

impl RateLimitConfig {
    /// Policy for the named operation
    pub fn to_policy(&self, operation: &str) -> RateLimitPolicy {
        RateLimitPolicy::new(operation, self.window_secs, self.max_count)
    }
}
