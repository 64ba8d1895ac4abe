//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use meteo::logging::init_logging;
//! use meteo::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log the start of an update run
///
/// # Example
///
/// ```no_run
/// use meteo::log_update_start;
/// use meteo::core::dates::RunDates;
/// use chrono::NaiveDate;
///
/// let dates = RunDates::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap();
/// log_update_start!("Compte-rendu Météo", &dates);
/// ```
#[macro_export]
macro_rules! log_update_start {
    ($sheet:expr, $dates:expr) => {
        tracing::info!(
            sheet = %$sheet,
            today = %$dates.today(),
            yesterday = %$dates.yesterday(),
            weekday = %$dates.weekday(),
            "Starting update"
        );
    };
}

/// Log the completion of an update run
///
/// # Example
///
/// ```no_run
/// use meteo::log_update_complete;
/// use std::time::Duration;
///
/// log_update_complete!(3, 42, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_update_complete {
    ($updated:expr, $total:expr, $duration:expr) => {
        tracing::info!(
            updated = $updated,
            total = $total,
            duration_ms = $duration.as_millis() as u64,
            "Update completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use meteo::log_error_with_context;
/// use meteo::domain::MeteoError;
///
/// let error = MeteoError::MissingSheet("Compte-rendu Météo".to_string());
/// log_error_with_context!(&error, "Failed to open workbook");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
