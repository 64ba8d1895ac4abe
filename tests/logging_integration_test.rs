//! Integration tests for logging functionality

use meteo::config::LoggingConfig;
use meteo::logging::{init_logging, LOG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "./logs");
}

#[test]
fn test_console_only_config() {
    let config = LoggingConfig::console_only();
    assert!(!config.local_enabled);
}

// The global subscriber can only be installed once per process, so this is
// the only test in this binary that calls init_logging.
#[test]
fn test_init_logging_creates_log_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).expect("Failed to initialize logging");
    tracing::info!(rows = 4, "integration log line");
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join(LOG_FILE_NAME).exists());

    // A second installation is reported, not a panic
    assert!(init_logging("info", &LoggingConfig::console_only()).is_err());
}
