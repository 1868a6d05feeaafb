//! Bounded Decrement Use Case
//!
//! Keeps a finite quantity from being oversold. The admission decision is
//! taken only by the store-side script that reads and conditionally writes
//! the quantity in one step; [`StockService::remaining`] is a display value.

use kvguard_domain::constants::INSUFFICIENT_SENTINEL;
use kvguard_domain::error::{Error, Result};
use kvguard_domain::ports::providers::{StoreProvider, StoreScript};
use kvguard_domain::value_objects::Consumption;
use std::sync::Arc;
use tracing::{debug, info};

use crate::keys::KeySpace;

/// Countable resource service
#[derive(Debug, Clone)]
pub struct StockService {
    store: Arc<dyn StoreProvider>,
    keys: KeySpace,
}

impl StockService {
    /// Create new stock service with injected dependencies
    pub fn new(store: Arc<dyn StoreProvider>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Write the starting quantity of a resource, replacing any previous value
    pub async fn initialize(&self, resource: &str, quantity: i64) -> Result<()> {
        if quantity < 0 {
            return Err(Error::invalid_argument(format!(
                "initial quantity of '{resource}' cannot be negative"
            )));
        }
        let key = self.keys.stock(resource)?;
        self.store.set(&key, &quantity.to_string(), None).await?;
        info!(resource, quantity, "stock initialized");
        Ok(())
    }

    /// Atomically take `amount` units if at least that many are left
    ///
    /// Either the whole amount is taken or nothing changes.
    pub async fn try_consume(&self, resource: &str, amount: i64) -> Result<Consumption> {
        if amount <= 0 {
            return Err(Error::invalid_argument(format!(
                "decrement amount for '{resource}' must be positive, got {amount}"
            )));
        }
        let key = self.keys.stock(resource)?;

        let result = self
            .store
            .run_script(
                StoreScript::BoundedDecrement,
                &[key.as_str()],
                &[amount.to_string()],
            )
            .await?;

        match result {
            INSUFFICIENT_SENTINEL => {
                debug!(resource, amount, "stock insufficient");
                Ok(Consumption::Insufficient { requested: amount })
            }
            remaining if remaining >= 0 => {
                debug!(resource, amount, remaining, "stock consumed");
                Ok(Consumption::Consumed { remaining })
            }
            other => Err(Error::store(format!(
                "{} returned unexpected result {other}",
                StoreScript::BoundedDecrement
            ))),
        }
    }

    /// Current quantity, for display only
    ///
    /// Stale as soon as another caller consumes; never use it to decide
    /// whether a consumption will succeed.
    pub async fn remaining(&self, resource: &str) -> Result<Option<i64>> {
        let key = self.keys.stock(resource)?;
        match self.store.get(&key).await? {
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|e| {
                Error::store_with_source(format!("stock record '{key}' is not an integer"), e)
            }),
            None => Ok(None),
        }
    }
}
