//! Lock Manager Use Case
//!
//! Non-blocking mutual exclusion over a named store record.
//!
//! `acquire` is a single "set if absent, with expiry" carrying a fresh token.
//! `release` is a single compare-and-delete script, so a holder whose record
//! already expired can never delete the record of the next holder.
//!
//! The TTL keeps a crashed holder from wedging the name forever. Work that
//! outlives the TTL is no longer exclusive; size the TTL against the expected
//! work duration. Leases are never renewed.

use kvguard_domain::constants::{MAX_TTL_SECS, NOT_OWNER, RELEASED};
use kvguard_domain::error::{Error, Result};
use kvguard_domain::ports::providers::{StoreProvider, StoreScript};
use kvguard_domain::value_objects::{LockAttempt, LockLease, ReleaseOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::keys::KeySpace;

/// Lock manager backed by the shared store
#[derive(Debug, Clone)]
pub struct LockService {
    store: Arc<dyn StoreProvider>,
    keys: KeySpace,
}

impl LockService {
    /// Create new lock service with injected dependencies
    pub fn new(store: Arc<dyn StoreProvider>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Try to take the lock once
    ///
    /// Returns `LockAttempt::Busy` immediately if any record exists for
    /// `name`; there is no waiting or retry.
    pub async fn acquire(&self, name: &str, ttl: Duration) -> Result<LockAttempt> {
        if ttl.is_zero() {
            return Err(Error::invalid_argument(format!(
                "lock ttl for '{name}' must be positive"
            )));
        }
        if ttl > Duration::from_secs(MAX_TTL_SECS) {
            return Err(Error::invalid_argument(format!(
                "lock ttl for '{name}' exceeds the maximum of {MAX_TTL_SECS}s"
            )));
        }
        let key = self.keys.lock(name)?;
        let token = Uuid::new_v4().to_string();

        if !self.store.set_if_absent(&key, &token, ttl).await? {
            debug!(lock = name, "lock busy");
            return Ok(LockAttempt::Busy);
        }

        debug!(lock = name, ttl_ms = millis(ttl), "lock acquired");
        Ok(LockAttempt::Acquired(LockLease {
            name: name.to_string(),
            key,
            token,
            ttl,
            acquired_at: Instant::now(),
        }))
    }

    /// Release the lock if the stored token is still this lease's token
    ///
    /// `NotOwner` means the record expired (and was possibly re-acquired by
    /// someone else) while the work was running.
    pub async fn release(&self, lease: &LockLease) -> Result<ReleaseOutcome> {
        let result = self
            .store
            .run_script(
                StoreScript::CompareAndDelete,
                &[lease.key.as_str()],
                &[lease.token.clone()],
            )
            .await?;

        match result {
            RELEASED => {
                debug!(lock = %lease.name, "lock released");
                Ok(ReleaseOutcome::Released)
            }
            NOT_OWNER => {
                warn!(
                    lock = %lease.name,
                    held_ms = millis(lease.held_for()),
                    ttl_ms = millis(lease.ttl),
                    "lock no longer owned at release; ttl shorter than the protected work"
                );
                Ok(ReleaseOutcome::NotOwner)
            }
            other => Err(Error::store(format!(
                "{} returned unexpected result {other}",
                StoreScript::CompareAndDelete
            ))),
        }
    }

    /// Token currently stored for `name`, if any
    pub async fn holder(&self, name: &str) -> Result<Option<String>> {
        let key = self.keys.lock(name)?;
        self.store.get(&key).await
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
