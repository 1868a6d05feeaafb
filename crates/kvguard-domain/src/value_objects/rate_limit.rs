//! Rate limit policy

use crate::constants::MAX_TTL_SECS;
use crate::error::{Error, Result};
use std::time::Duration;

/// Fixed-window limit attached to an operation
///
/// The explicit counterpart of a declarative "at most `max_count` calls per
/// `window`" annotation. The window starts with the first call seen for a
/// resource key and resets fully when the record expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Identity of the guarded operation, part of the derived key
    pub operation: String,
    /// Window length
    pub window: Duration,
    /// Maximum calls admitted per window
    pub max_count: u32,
}

impl RateLimitPolicy {
    /// Create a policy with the window given in seconds
    pub fn new<S: Into<String>>(operation: S, window_secs: u64, max_count: u32) -> Self {
        Self {
            operation: operation.into(),
            window: Duration::from_secs(window_secs),
            max_count,
        }
    }

    /// Create a policy with an arbitrary window
    pub fn with_window<S: Into<String>>(operation: S, window: Duration, max_count: u32) -> Self {
        Self {
            operation: operation.into(),
            window,
            max_count,
        }
    }

    /// Window length in whole milliseconds, as sent to the store
    pub fn window_millis(&self) -> u64 {
        u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX)
    }

    /// Reject policies the store cannot enforce
    pub fn validate(&self) -> Result<()> {
        if self.operation.is_empty() {
            return Err(Error::invalid_argument(
                "rate limit operation name cannot be empty",
            ));
        }
        if self.window_millis() == 0 {
            return Err(Error::invalid_argument(format!(
                "rate limit window for '{}' must be at least 1ms",
                self.operation
            )));
        }
        if self.window > Duration::from_secs(MAX_TTL_SECS) {
            return Err(Error::invalid_argument(format!(
                "rate limit window for '{}' exceeds the maximum of {MAX_TTL_SECS}s",
                self.operation
            )));
        }
        if self.operation.contains(':') {
            return Err(Error::invalid_argument(format!(
                "rate limit operation '{}' cannot contain ':'",
                self.operation
            )));
        }
        if self.max_count == 0 {
            return Err(Error::invalid_argument(format!(
                "rate limit max_count for '{}' must be positive",
                self.operation
            )));
        }
        Ok(())
    }
}
