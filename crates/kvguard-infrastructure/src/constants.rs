//! Infrastructure layer constants
//!
//! Domain constants (key namespaces, script sentinels) live in
//! `kvguard_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "kvguard.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "kvguard";

/// Environment variable prefix for configuration (`KVGUARD_STORE__URI`)
pub const CONFIG_ENV_PREFIX: &str = "KVGUARD_";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// STORE CONSTANTS
// ============================================================================

/// Store provider used when none is configured
pub const DEFAULT_STORE_PROVIDER: &str = "redis";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "KVGUARD_LOG";

/// File name stem of rolled log files
pub const LOG_FILE_PREFIX: &str = "kvguard";

// ============================================================================
// HEALTH CONSTANTS
// ============================================================================

/// Name of the store health check
pub const STORE_HEALTH_CHECK: &str = "store";
