// Meteo - "Compte-rendu Météo" batch updater
// Copyright (c) 2025 Meteo Contributors
// Licensed under the MIT License

//! # Meteo - "Compte-rendu Météo" batch updater
//!
//! Meteo updates the daily weather-report worksheet of the planning
//! workbook. Each row carries an SAP target code in column C. Depending on
//! the code and on the current date, the row is marked `OK`, dated today or
//! yesterday, and its counter and auxiliary columns are reset.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Classification rules, reference dates and the batch updater
//! - [`adapters`] - Spreadsheet hosts (`.xlsx` workbooks, in-memory sheets)
//! - [`domain`] - Cell types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use meteo::adapters::memory::MemorySheet;
//! use meteo::core::dates::RunDates;
//! use meteo::core::updater::{layout, run_update};
//! use meteo::domain::CellValue;
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sheet = MemorySheet::with_codes(
//!     "Compte-rendu Météo",
//!     layout::CODE,
//!     &["P35", "PR1", "XYZ", "PA8"],
//! );
//! let dates = RunDates::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())?;
//!
//! let summary = run_update(&mut sheet, &dates)?;
//! assert_eq!(summary.updated_rows, 3);
//! assert_eq!(sheet.get(layout::COUNTER.at(4)), CellValue::Number(9999.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Rules
//!
//! See [`core::rules`] for the ordered rule table. The first matching rule
//! wins and unknown codes leave their row untouched.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
