//! Configuration schema types
//!
//! This module defines the configuration structure for Meteo.

use crate::core::dates::Clock;
use serde::{Deserialize, Serialize};

/// Name of the worksheet the updater works on
pub const DEFAULT_SHEET_NAME: &str = "Compte-rendu Météo";

/// Main Meteo configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteoConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Workbook location
    pub workbook: WorkbookConfig,

    /// Run settings
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MeteoConfig {
    /// Configuration for `path` with every other setting at its default
    ///
    /// Used when no configuration file exists and the workbook is given on
    /// the command line. File logging is off in that case.
    pub fn for_workbook(path: impl Into<String>) -> Self {
        Self {
            application: ApplicationConfig::default(),
            workbook: WorkbookConfig {
                path: path.into(),
                sheet_name: default_sheet_name(),
                output_path: None,
            },
            run: RunConfig::default(),
            logging: LoggingConfig::console_only(),
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.workbook.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (plan only, don't save the workbook)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Workbook location and target sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookConfig {
    /// Path of the `.xlsx` workbook
    pub path: String,

    /// Worksheet to update
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Where to save the result; the source workbook is overwritten when unset
    #[serde(default)]
    pub output_path: Option<String>,
}

impl WorkbookConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("workbook.path cannot be empty".to_string());
        }
        if !self.path.to_lowercase().ends_with(".xlsx") {
            return Err(format!(
                "workbook.path '{}' must point to an .xlsx file",
                self.path
            ));
        }
        if self.sheet_name.trim().is_empty() {
            return Err("workbook.sheet_name cannot be empty".to_string());
        }
        if let Some(output) = &self.output_path {
            if output.trim().is_empty() {
                return Err("workbook.output_path cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Run settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Source of the reference date when none is given on the command line
    #[serde(default)]
    pub clock: Clock,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    /// Console-only logging
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_workbook_config_validation() {
        let mut config = MeteoConfig::for_workbook("planning.xlsx").workbook;
        assert!(config.validate().is_ok());
        assert_eq!(config.sheet_name, "Compte-rendu Météo");

        config.path = "planning.csv".to_string();
        assert!(config.validate().is_err());

        config.path = "  ".to_string();
        assert!(config.validate().is_err());

        config.path = "PLANNING.XLSX".to_string();
        config.output_path = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_path = String::new();
        assert!(config.validate().is_err());

        config.local_enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: MeteoConfig = toml::from_str(
            r#"
[workbook]
path = "planning.xlsx"
"#,
        )
        .unwrap();

        assert_eq!(config.application.log_level, "info");
        assert!(!config.application.dry_run);
        assert_eq!(config.workbook.sheet_name, DEFAULT_SHEET_NAME);
        assert_eq!(config.run.clock, Clock::Utc);
        assert!(config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clock_parsing() {
        let config: MeteoConfig = toml::from_str(
            r#"
[workbook]
path = "planning.xlsx"

[run]
clock = "local"
"#,
        )
        .unwrap();
        assert_eq!(config.run.clock, Clock::Local);
    }
}
