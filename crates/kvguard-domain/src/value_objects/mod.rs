//! Value Objects
//!
//! Immutable results and parameters exchanged between the primitives and
//! their callers.

pub mod admission;
pub mod lock;
pub mod rate_limit;

pub use admission::{Consumption, Guarded, RateDecision};
pub use lock::{LockAttempt, LockLease, ReleaseOutcome};
pub use rate_limit::RateLimitPolicy;
