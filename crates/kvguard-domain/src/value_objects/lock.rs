//! Lock value objects

use std::time::{Duration, Instant};

/// Proof of a successful lock acquisition
///
/// The token is the only thing that can remove the lock record before its
/// TTL fires. Keep the lease until the protected work is finished and hand it
/// back to `release`.
#[derive(Debug, Clone)]
pub struct LockLease {
    /// Caller-supplied lock name
    pub name: String,
    /// Fully qualified store key
    pub key: String,
    /// Token minted for this acquisition
    pub token: String,
    /// Record expiry requested at acquisition
    pub ttl: Duration,
    /// Local instant the lock was granted
    pub acquired_at: Instant,
}

impl LockLease {
    /// Time the lease has been held so far
    pub fn held_for(&self) -> Duration {
        self.acquired_at.elapsed()
    }
}

/// Outcome of a non-blocking lock acquisition
#[derive(Debug, Clone)]
pub enum LockAttempt {
    /// The lock was granted
    Acquired(LockLease),
    /// A record already exists for the name
    Busy,
}

impl LockAttempt {
    /// Returns the lease if acquired
    pub fn lease(self) -> Option<LockLease> {
        match self {
            Self::Acquired(lease) => Some(lease),
            Self::Busy => None,
        }
    }

    /// True when the lock was granted
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired(_))
    }
}

/// Outcome of a token-checked release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The stored token matched and the record was deleted
    Released,
    /// The record was absent or held a different token; nothing changed
    NotOwner,
}
