//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Meteo configuration file.

use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check that the workbook exists
    #[arg(long)]
    pub check_workbook: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Workbook: {}", config.workbook.path);
        println!("  Sheet: {}", config.workbook.sheet_name);
        println!(
            "  Output: {}",
            config
                .workbook
                .output_path
                .as_deref()
                .unwrap_or("(in place)")
        );
        println!("  Clock: {}", config.run.clock);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!(
                    "{} ({})",
                    config.logging.local_path, config.logging.local_rotation
                )
            } else {
                "disabled".to_string()
            }
        );
        println!();

        if self.check_workbook && !Path::new(&config.workbook.path).exists() {
            println!("❌ Workbook not found: {}", config.workbook.path);
            return Ok(3);
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {
            check_workbook: false,
        };
        assert_eq!(args.execute("/nonexistent/meteo.toml").unwrap(), 2);
    }

    #[test]
    fn test_validate_check_workbook() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[workbook]\npath = \"/nonexistent/planning.xlsx\"\n[logging]\nlocal_enabled = false\n")
            .unwrap();
        file.flush().unwrap();
        let path = file.path().to_string_lossy().to_string();

        let args = ValidateArgs {
            check_workbook: false,
        };
        assert_eq!(args.execute(&path).unwrap(), 0);

        let args = ValidateArgs {
            check_workbook: true,
        };
        assert_eq!(args.execute(&path).unwrap(), 3);
    }
}
