//! Configuration management for Meteo.
//!
//! Meteo reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `METEO_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [workbook]
//! path = "${METEO_SHARE}/Compte-rendu.xlsx"
//! sheet_name = "Compte-rendu Météo"
//!
//! [run]
//! clock = "utc"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! Only file locations, the clock and logging are configurable. The code
//! rules and the column layout are fixed.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, LoggingConfig, MeteoConfig, RunConfig, WorkbookConfig, DEFAULT_SHEET_NAME,
};
