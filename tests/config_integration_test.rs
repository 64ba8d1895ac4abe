//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests.

use meteo::config::load_config;
use meteo::core::dates::Clock;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("METEO_APPLICATION_LOG_LEVEL");
    std::env::remove_var("METEO_APPLICATION_DRY_RUN");
    std::env::remove_var("METEO_WORKBOOK_PATH");
    std::env::remove_var("METEO_WORKBOOK_SHEET_NAME");
    std::env::remove_var("METEO_WORKBOOK_OUTPUT_PATH");
    std::env::remove_var("METEO_RUN_CLOCK");
    std::env::remove_var("METEO_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("TEST_METEO_SHARE");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[workbook]
path = "/srv/planning/Compte-rendu.xlsx"
sheet_name = "Compte-rendu Météo"
output_path = "/srv/planning/Compte-rendu-out.xlsx"

[run]
clock = "local"

[logging]
local_enabled = false
local_path = "/tmp/meteo"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.workbook.path, "/srv/planning/Compte-rendu.xlsx");
    assert_eq!(config.workbook.sheet_name, "Compte-rendu Météo");
    assert_eq!(
        config.workbook.output_path.as_deref(),
        Some("/srv/planning/Compte-rendu-out.xlsx")
    );
    assert_eq!(config.run.clock, Clock::Local);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/meteo");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_METEO_SHARE", "/mnt/share");

    let file = write_config(
        r#"
[workbook]
path = "${TEST_METEO_SHARE}/Compte-rendu.xlsx"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");
    assert_eq!(config.workbook.path, "/mnt/share/Compte-rendu.xlsx");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[workbook]
path = "${TEST_METEO_SHARE}/Compte-rendu.xlsx"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_METEO_SHARE"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("METEO_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("METEO_WORKBOOK_SHEET_NAME", "Feuil1");
    std::env::set_var("METEO_RUN_CLOCK", "local");
    std::env::set_var("METEO_LOGGING_LOCAL_ENABLED", "false");

    let file = write_config(
        r#"
[workbook]
path = "planning.xlsx"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.workbook.sheet_name, "Feuil1");
    assert_eq!(config.run.clock, Clock::Local);
    assert!(!config.logging.local_enabled);

    cleanup_env_vars();
}

#[test]
fn test_invalid_clock_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("METEO_RUN_CLOCK", "sundial");

    let file = write_config("[workbook]\npath = \"planning.xlsx\"\n");
    assert!(load_config(file.path()).is_err());

    cleanup_env_vars();
}

#[test]
fn test_invalid_log_level_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "verbose"

[workbook]
path = "planning.xlsx"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("log_level"));
}

#[test]
fn test_missing_workbook_section() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[application]\nlog_level = \"info\"\n");
    assert!(load_config(file.path()).is_err());
}
