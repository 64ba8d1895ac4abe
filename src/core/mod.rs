//! Core business logic for Meteo.
//!
//! # Modules
//!
//! - [`dates`] - Reference dates shared by all rows of a run
//! - [`rules`] - The ordered classification table
//! - [`updater`] - Batch read, classify, batch write
//! - [`summary`] - Run reporting
//!
//! # Example
//!
//! ```rust,no_run
//! use meteo::adapters::xlsx::XlsxWorkbook;
//! use meteo::core::dates::{Clock, RunDates};
//! use meteo::core::updater::run_update;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = XlsxWorkbook::open("planning.xlsx", "Compte-rendu Météo")?;
//! let dates = RunDates::from_clock(Clock::Utc)?;
//!
//! let summary = run_update(&mut workbook, &dates)?;
//! workbook.save(None)?;
//!
//! println!("Updated {} of {} rows", summary.updated_rows, summary.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod dates;
pub mod rules;
pub mod summary;
pub mod updater;
