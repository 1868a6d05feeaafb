//! Fixed-Window Rate Limiter Use Case
//!
//! Counts invocations per (operation, resource key) in a store record whose
//! expiry equals the window. The first increment of a window sets the expiry
//! inside the same script, so concurrent first callers cannot lose an
//! increment or leave a record without expiry.
//!
//! Bursts across a window boundary (up to twice the limit in a short span)
//! are accepted: this is a fixed window, not a sliding one.

use kvguard_domain::error::{Error, Result};
use kvguard_domain::ports::providers::{StoreProvider, StoreScript};
use kvguard_domain::value_objects::{RateDecision, RateLimitPolicy};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::keys::KeySpace;

/// Rate limiter backed by the shared store
#[derive(Debug, Clone)]
pub struct RateLimitService {
    store: Arc<dyn StoreProvider>,
    keys: KeySpace,
    policies: HashMap<String, RateLimitPolicy>,
}

impl RateLimitService {
    /// Create new rate limit service with injected dependencies
    pub fn new(store: Arc<dyn StoreProvider>, keys: KeySpace) -> Self {
        Self {
            store,
            keys,
            policies: HashMap::new(),
        }
    }

    /// Register declared policies, looked up by operation name
    pub fn with_policies<I>(mut self, policies: I) -> Result<Self>
    where
        I: IntoIterator<Item = RateLimitPolicy>,
    {
        for policy in policies {
            policy.validate()?;
            self.policies.insert(policy.operation.clone(), policy);
        }
        Ok(self)
    }

    /// Declared policy for an operation
    pub fn policy(&self, operation: &str) -> Option<&RateLimitPolicy> {
        self.policies.get(operation)
    }

    /// Count this call and decide whether it is admitted
    pub async fn allow(&self, policy: &RateLimitPolicy, resource_key: &str) -> Result<RateDecision> {
        policy.validate()?;
        let key = self.keys.rate(&policy.operation, resource_key)?;

        let count = self
            .store
            .run_script(
                StoreScript::IncrementWithExpiry,
                &[key.as_str()],
                &[policy.window_millis().to_string()],
            )
            .await?;

        let count = u64::try_from(count)
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| {
                Error::store(format!(
                    "{} returned non-positive count {count}",
                    StoreScript::IncrementWithExpiry
                ))
            })?;

        let decision = RateDecision::from_count(count, policy.max_count);
        debug!(
            operation = %policy.operation,
            key = resource_key,
            count,
            limit = policy.max_count,
            admitted = decision.is_admitted(),
            "rate limit checked"
        );
        Ok(decision)
    }

    /// Count this call against the declared policy of `operation`
    pub async fn allow_declared(&self, operation: &str, resource_key: &str) -> Result<RateDecision> {
        let policy = self.policy(operation).ok_or_else(|| {
            Error::invalid_argument(format!("no rate limit declared for '{operation}'"))
        })?;
        self.allow(policy, resource_key).await
    }

    /// Drop the current window of a key (admin function)
    pub async fn reset(&self, policy: &RateLimitPolicy, resource_key: &str) -> Result<bool> {
        let key = self.keys.rate(&policy.operation, resource_key)?;
        Ok(self.store.delete(&[key]).await? > 0)
    }
}
