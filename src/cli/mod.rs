//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Meteo using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Meteo - "Compte-rendu Météo" batch updater
#[derive(Parser, Debug)]
#[command(name = "meteo")]
#[command(version, about, long_about = None)]
#[command(author = "Meteo Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "meteo.toml", env = "METEO_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "METEO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the code rules to the worksheet and save the workbook
    Update(commands::update::UpdateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
