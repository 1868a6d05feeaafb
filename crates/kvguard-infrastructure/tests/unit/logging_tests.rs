//! Logging tests

use kvguard_infrastructure::config::LoggingConfig;
use kvguard_infrastructure::logging::{init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_second_init_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = LoggingConfig {
        file_output: Some(dir.path().join("kvguard.log")),
        ..LoggingConfig::default()
    };

    // The first call may lose to another test binary thread; the second always fails
    let _ = init_logging(&config);
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_invalid_level_fails_before_install() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}
