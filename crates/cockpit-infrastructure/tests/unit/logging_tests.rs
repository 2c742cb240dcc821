//! Logging Tests

use cockpit_infrastructure::config::LoggingConfig;
use cockpit_infrastructure::logging::{init_logging, log_config_loaded, parse_log_level};
use std::path::Path;
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    let err = parse_log_level("verbose").unwrap_err();
    assert!(err.to_string().contains("Invalid log level: verbose"));
}

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, "info");
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_init_logging_rejects_invalid_level_before_installing() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..Default::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_log_config_loaded_does_not_panic() {
    log_config_loaded(Path::new("/nonexistent/cockpit.toml"), false);
    log_config_loaded(Path::new("cockpit.toml"), true);
}
