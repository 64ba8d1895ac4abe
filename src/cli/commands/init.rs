//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "meteo.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set workbook.path in {}", self.output);
                println!("  2. Validate configuration: meteo validate-config");
                println!("  3. Preview the changes: meteo update --dry-run");
                println!("  4. Run the update: meteo update");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Sample configuration with every setting at its default
    pub fn sample_config() -> &'static str {
        r#"# Meteo Configuration File
# Batch updater for the "Compte-rendu Météo" worksheet

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"
# Plan only, never save the workbook
dry_run = false

[workbook]
# Workbook to update; ${VAR} references are read from the environment
path = "Compte-rendu.xlsx"
sheet_name = "Compte-rendu Météo"
# Save the result elsewhere instead of overwriting the workbook
# output_path = "Compte-rendu-updated.xlsx"

[run]
# Where "today" comes from when --date is not given: utc or local
clock = "utc"

[logging]
local_enabled = true
local_path = "./logs"
# daily, hourly or never
local_rotation = "daily"
"#
    }
}
