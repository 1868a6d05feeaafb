//! Guarded-Call Wrapper
//!
//! Explicit composition of "admit → run → clean up" around a unit of work.
//! Call sites wrap their work instead of relying on an annotation side
//! effect, so the control flow stays visible.
//!
//! ```ignore
//! let outcome = guard
//!     .with_lock("lock-key", Duration::from_secs(5), || async {
//!         stock.try_consume("sku-1", 1).await
//!     })
//!     .await?;
//! ```
//!
//! The outer `Result` only fails on store errors. The work's own result,
//! error values included, travels unchanged inside [`Guarded::Completed`].

use futures::FutureExt;
use kvguard_domain::error::Result;
use kvguard_domain::value_objects::{
    Guarded, LockAttempt, LockLease, RateDecision, RateLimitPolicy, ReleaseOutcome,
};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::use_cases::{LockService, RateLimitService};

/// Runs work under a lock and/or a rate limit
#[derive(Debug, Clone)]
pub struct GuardedCall {
    locks: Arc<LockService>,
    limiter: Arc<RateLimitService>,
}

impl GuardedCall {
    /// Create new guarded call wrapper with injected dependencies
    pub fn new(locks: Arc<LockService>, limiter: Arc<RateLimitService>) -> Self {
        Self { locks, limiter }
    }

    /// Run `work` while holding the lock `name`
    ///
    /// Returns `Guarded::LockBusy` without running `work` if the lock is
    /// held. Otherwise the lock is released after `work` finishes, whether it
    /// returned normally or panicked (the panic resumes after release). If the
    /// returned future is dropped mid-work, release is spawned on the current
    /// runtime.
    pub async fn with_lock<T, F, Fut>(&self, name: &str, ttl: Duration, work: F) -> Result<Guarded<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let (outcome, _) = self.with_lock_observed(name, ttl, work).await?;
        Ok(outcome)
    }

    /// Same as [`with_lock`](Self::with_lock), also reporting how the release went
    ///
    /// The release outcome is `None` when the work did not run or the
    /// release itself failed at the store.
    pub async fn with_lock_observed<T, F, Fut>(
        &self,
        name: &str,
        ttl: Duration,
        work: F,
    ) -> Result<(Guarded<T>, Option<ReleaseOutcome>)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let lease = match self.locks.acquire(name, ttl).await? {
            LockAttempt::Acquired(lease) => lease,
            LockAttempt::Busy => {
                return Ok((
                    Guarded::LockBusy {
                        name: name.to_string(),
                    },
                    None,
                ));
            }
        };

        let guard = ReleaseGuard::new(Arc::clone(&self.locks), lease);
        let result = AssertUnwindSafe(async move { work().await })
            .catch_unwind()
            .await;
        let release = guard.release().await;

        match result {
            Ok(value) => Ok((Guarded::Completed(value), release)),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// Run `work` only if the rate limit admits this call
    pub async fn with_rate_limit<T, F, Fut>(
        &self,
        policy: &RateLimitPolicy,
        resource_key: &str,
        work: F,
    ) -> Result<Guarded<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.limiter.allow(policy, resource_key).await? {
            RateDecision::Admitted { .. } => Ok(Guarded::Completed(work().await)),
            RateDecision::Rejected { count, limit } => {
                debug!(
                    operation = %policy.operation,
                    key = resource_key,
                    count,
                    limit,
                    "call rate limited"
                );
                Ok(Guarded::RateLimited {
                    operation: policy.operation.clone(),
                    key: resource_key.to_string(),
                })
            }
        }
    }

    /// Run `work` under the declared policy of `operation`
    pub async fn with_declared_rate_limit<T, F, Fut>(
        &self,
        operation: &str,
        resource_key: &str,
        work: F,
    ) -> Result<Guarded<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let decision = self.limiter.allow_declared(operation, resource_key).await?;
        if decision.is_admitted() {
            Ok(Guarded::Completed(work().await))
        } else {
            Ok(Guarded::RateLimited {
                operation: operation.to_string(),
                key: resource_key.to_string(),
            })
        }
    }

    /// Rate check first, then the lock, then `work`
    ///
    /// A rejected call never touches the lock.
    pub async fn with_lock_and_rate_limit<T, F, Fut>(
        &self,
        policy: &RateLimitPolicy,
        resource_key: &str,
        name: &str,
        ttl: Duration,
        work: F,
    ) -> Result<Guarded<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let admitted = self
            .with_rate_limit(policy, resource_key, || async {})
            .await?;
        match admitted {
            Guarded::Completed(()) => self.with_lock(name, ttl, work).await,
            Guarded::LockBusy { name } => Ok(Guarded::LockBusy { name }),
            Guarded::RateLimited { operation, key } => Ok(Guarded::RateLimited { operation, key }),
        }
    }
}

/// Releases a lease exactly once, on the explicit path or on drop
struct ReleaseGuard {
    locks: Arc<LockService>,
    lease: Option<LockLease>,
}

impl ReleaseGuard {
    fn new(locks: Arc<LockService>, lease: LockLease) -> Self {
        Self {
            locks,
            lease: Some(lease),
        }
    }

    async fn release(mut self) -> Option<ReleaseOutcome> {
        let lease = self.lease.take()?;
        match self.locks.release(&lease).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(lock = %lease.name, error = %e, "failed to release lock; it will expire after its ttl");
                None
            }
        }
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        let Some(lease) = self.lease.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let locks = Arc::clone(&self.locks);
                handle.spawn(async move {
                    if let Err(e) = locks.release(&lease).await {
                        error!(lock = %lease.name, error = %e, "deferred lock release failed");
                    }
                });
            }
            Err(_) => {
                warn!(lock = %lease.name, "no runtime to release lock; it will expire after its ttl");
            }
        }
    }
}
