//! Configuration loading tests

use std::io::Write;
use std::time::Duration;

use kvguard_infrastructure::config::{AppConfig, ConfigLoader, RateLimitConfig};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.store.provider, "redis");
    assert_eq!(config.store.uri.as_deref(), Some("redis://localhost:6379"));
    assert_eq!(config.store.key_prefix, "kvguard");
    assert_eq!(config.lock.default_ttl(), Duration::from_secs(5));
    assert!(config.rate_limits.is_empty());
    assert!(config.stock.initial.is_empty());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_from_file_overrides_defaults() {
    let file = write_config(
        r#"
[store]
provider = "memory"
key_prefix = "shop"

[lock]
default_ttl_secs = 10

[rate_limits.login]
window_secs = 60
max_count = 5

[stock.initial]
"sku-1" = 1000
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .expect("valid config");

    assert_eq!(config.store.provider, "memory");
    assert_eq!(config.store.key_prefix, "shop");
    // Untouched keys keep their defaults
    assert_eq!(config.store.connect_timeout_ms, 5000);
    assert_eq!(config.lock.default_ttl_secs, 10);
    assert_eq!(
        config.rate_limits.get("login"),
        Some(&RateLimitConfig {
            window_secs: 60,
            max_count: 5
        })
    );
    assert_eq!(config.stock.initial.get("sku-1"), Some(&1000));

    let policies = config.rate_limit_policies();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0].operation, "login");
    assert_eq!(policies[0].window, Duration::from_secs(60));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let err = ConfigLoader::new()
        .with_config_path("/definitely/not/here/kvguard.toml")
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("configuration file not found"));
}

#[test]
fn test_zero_rate_limit_is_rejected() {
    let file = write_config(
        r#"
[store]
provider = "memory"

[rate_limits.login]
window_secs = 60
max_count = 0
"#,
    );

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("rate_limits.login"));
}

#[test]
fn test_zero_lock_ttl_is_rejected() {
    let file = write_config("[lock]\ndefault_ttl_secs = 0\n");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("[lock]"));
}

#[test]
fn test_oversized_lock_ttl_is_rejected() {
    let file = write_config("[lock]\ndefault_ttl_secs = 315360000000\n");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("[lock]"));
}

#[test]
fn test_negative_initial_stock_is_rejected() {
    let file = write_config("[stock.initial]\nsku-1 = -3\n");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("sku-1"));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let file = write_config("[logging]\nlevel = \"loud\"\n");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_malformed_toml_is_configuration_error() {
    let file = write_config("[store\nprovider = ");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap_err();
    assert!(matches!(
        err,
        kvguard_domain::error::Error::Configuration { .. }
    ));
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("kvguard.toml");

    let mut config = AppConfig::default();
    config.store.provider = "memory".to_string();
    config.rate_limits.insert(
        "search".to_string(),
        RateLimitConfig {
            window_secs: 1,
            max_count: 3,
        },
    );

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).expect("save");

    let loaded = loader.load().expect("load");
    assert_eq!(loaded.store.provider, "memory");
    assert_eq!(loaded.rate_limits, config.rate_limits);
}

/// Environment variables override file values
///
/// Run with: `cargo test -p kvguard-infrastructure --test unit -- --test-threads=1 --ignored`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let file = write_config("[store]\nprovider = \"memory\"\n");

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::set_var("KVGUARD_STORE__KEY_PREFIX", "from-env");
        std::env::set_var("KVGUARD_RATE_LIMITS__CHECKOUT__WINDOW_SECS", "10");
        std::env::set_var("KVGUARD_RATE_LIMITS__CHECKOUT__MAX_COUNT", "2");
    }

    let config = ConfigLoader::new().with_config_path(file.path()).load();

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::remove_var("KVGUARD_STORE__KEY_PREFIX");
        std::env::remove_var("KVGUARD_RATE_LIMITS__CHECKOUT__WINDOW_SECS");
        std::env::remove_var("KVGUARD_RATE_LIMITS__CHECKOUT__MAX_COUNT");
    }

    let config = config.expect("valid config");
    assert_eq!(config.store.provider, "memory");
    assert_eq!(config.store.key_prefix, "from-env");
    assert_eq!(config.rate_limits["checkout"].max_count, 2);
}
