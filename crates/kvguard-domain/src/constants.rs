//! Domain constants
//!
//! Key namespaces and the wire sentinels shared between the application
//! layer and the store providers.

/// Default prefix prepended to every key written by kvguard
pub const DEFAULT_KEY_PREFIX: &str = "kvguard";

/// Namespace segment for lock records
pub const LOCK_NAMESPACE: &str = "lock";

/// Namespace segment for countable resource records
pub const STOCK_NAMESPACE: &str = "stock";

/// Namespace segment for rate window records
pub const RATE_NAMESPACE: &str = "rate";

/// Wire result of the bounded decrement script when the quantity is insufficient
pub const INSUFFICIENT_SENTINEL: i64 = -1;

/// Wire result of the compare-and-delete script when the token matched
pub const RELEASED: i64 = 1;

/// Wire result of the compare-and-delete script when the token did not match
pub const NOT_OWNER: i64 = 0;

/// Default lock TTL in seconds (matches the 5 second lease of the stock demo)
pub const DEFAULT_LOCK_TTL_SECS: u64 = 5;

/// Longest lock TTL or rate window accepted, in seconds (30 days)
pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;
