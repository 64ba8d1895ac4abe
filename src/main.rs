// Meteo - "Compte-rendu Météo" batch updater
// Copyright (c) 2025 Meteo Contributors
// Licensed under the MIT License

use clap::Parser;
use meteo::cli::{Cli, Commands};
use meteo::config::{load_config, LoggingConfig};
use meteo::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the configuration file when there is a valid one
    let (config_level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (Some(config.application.log_level), config.logging),
        Err(_) => (None, LoggingConfig::console_only()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Meteo - Compte-rendu Météo updater"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, flush the file logger first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Update(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
