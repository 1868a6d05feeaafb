//! Countable resource configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resources whose quantity is written at startup
///
/// Seeding replaces whatever quantity the store holds, so leave this empty
/// on every process but the one that owns the inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    /// Starting quantity per resource id
    pub initial: BTreeMap<String, i64>,
}
