//! Provider constants

/// Redis URI used when the configuration does not name one
pub const DEFAULT_REDIS_URI: &str = "redis://localhost:6379";

/// Redis connection establishment timeout (milliseconds)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
