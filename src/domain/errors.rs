//! Domain error types
//!
//! This module defines the error hierarchy for Meteo.
//! Errors are domain-specific and don't expose third-party spreadsheet types.

use thiserror::Error;

/// Main Meteo error type
///
/// This is the primary error type used throughout the library.
/// Unrecognized codes and empty sheets are not errors: the first is a silent
/// skip, the second a successful run with zero updates.
#[derive(Debug, Error)]
pub enum MeteoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested worksheet does not exist in the workbook
    #[error("Worksheet not found: {0}")]
    MissingSheet(String),

    /// Workbook read/write failures reported by the spreadsheet host
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl MeteoError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MeteoError::Configuration(_) | MeteoError::Validation(_) => 2,
            MeteoError::MissingSheet(_) | MeteoError::Workbook(_) => 3,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MeteoError {
    fn from(err: std::io::Error) -> Self {
        MeteoError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MeteoError {
    fn from(err: serde_json::Error) -> Self {
        MeteoError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MeteoError {
    fn from(err: toml::de::Error) -> Self {
        MeteoError::Configuration(format!("TOML parse error: {err}"))
    }
}
