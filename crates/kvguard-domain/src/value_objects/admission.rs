//! Admission outcomes
//!
//! Rejections are ordinary values here. Only `into_result` turns them into
//! [`Error`] variants, for callers that want to bail out with `?`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Outcome of an atomic bounded decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Consumption {
    /// The decrement was applied
    Consumed {
        /// Quantity left after the decrement (may be zero)
        remaining: i64,
    },
    /// The stored quantity was lower than the requested amount
    Insufficient {
        /// Requested amount
        requested: i64,
    },
}

impl Consumption {
    /// True when the decrement was applied
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed { .. })
    }

    /// Remaining quantity, or `Error::Insufficient`
    pub fn into_result(self, resource: &str) -> Result<i64> {
        match self {
            Self::Consumed { remaining } => Ok(remaining),
            Self::Insufficient { requested } => Err(Error::Insufficient {
                resource: resource.to_string(),
                requested,
            }),
        }
    }
}

/// Outcome of a fixed-window rate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RateDecision {
    /// Within the limit
    Admitted {
        /// Invocations observed in the current window, this one included
        count: u64,
        /// Maximum admitted per window
        limit: u32,
    },
    /// Over the limit
    Rejected {
        /// Invocations observed in the current window, this one included
        count: u64,
        /// Maximum admitted per window
        limit: u32,
    },
}

impl RateDecision {
    /// Decide from the post-increment counter value
    pub fn from_count(count: u64, limit: u32) -> Self {
        if count <= u64::from(limit) {
            Self::Admitted { count, limit }
        } else {
            Self::Rejected { count, limit }
        }
    }

    /// True when the call may proceed
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }

    /// Invocations observed in the current window
    pub fn count(&self) -> u64 {
        match self {
            Self::Admitted { count, .. } | Self::Rejected { count, .. } => *count,
        }
    }

    /// Calls left in the current window
    pub fn remaining(&self) -> u64 {
        match self {
            Self::Admitted { count, limit } | Self::Rejected { count, limit } => {
                u64::from(*limit).saturating_sub(*count)
            }
        }
    }
}

/// Outcome of a guarded call
///
/// `Completed` carries whatever the wrapped work returned, errors included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The work ran and produced this value
    Completed(T),
    /// The lock was held by someone else; the work did not run
    LockBusy {
        /// Lock name
        name: String,
    },
    /// The rate limit rejected the call; the work did not run
    RateLimited {
        /// Rate limited operation
        operation: String,
        /// Caller-defined resource key
        key: String,
    },
}

impl<T> Guarded<T> {
    /// True when the work ran
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Returns the work's value if it ran
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Map the completed value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Guarded<U> {
        match self {
            Self::Completed(value) => Guarded::Completed(f(value)),
            Self::LockBusy { name } => Guarded::LockBusy { name },
            Self::RateLimited { operation, key } => Guarded::RateLimited { operation, key },
        }
    }

    /// Convert rejections into `Error::LockBusy` / `Error::RateLimited`
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::LockBusy { name } => Err(Error::LockBusy { name }),
            Self::RateLimited { operation, key } => Err(Error::RateLimited { operation, key }),
        }
    }
}
