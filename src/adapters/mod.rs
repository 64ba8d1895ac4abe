//! Spreadsheet host integrations for Meteo.
//!
//! - [`store`] - The [`store::SheetStore`] trait the updater is written against
//! - [`xlsx`] - `.xlsx` workbooks through `umya-spreadsheet`
//! - [`memory`] - An in-memory sheet for tests
//!
//! Adapters isolate the spreadsheet library so the rules can be tested
//! without a workbook on disk.

pub mod memory;
pub mod store;
pub mod xlsx;
