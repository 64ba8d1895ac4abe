//! Spreadsheet host abstraction
//!
//! This module defines the narrow capability set the updater needs from a
//! spreadsheet host. Adapters implement it for real workbooks
//! ([`crate::adapters::xlsx`]) and for in-memory sheets used in tests and
//! previews ([`crate::adapters::memory`]).

use crate::domain::{CellAddress, CellValue, Column, Result};

/// Format pattern applied to the date columns
pub const DATE_FORMAT: &str = "yyyy/mm/dd";

/// Plain numeric format applied to the `P85` counter cell
pub const GENERAL_FORMAT: &str = "General";

/// What [`SheetStore::read_column`] returns for formula cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Displayed values; formula cells yield their last computed result
    Values,
    /// Stored contents; formula cells yield [`CellValue::Formula`]
    Contents,
}

/// Key/value access to a single worksheet
///
/// Rows are 1-based. Column reads and writes always cover rows `1..=rows`.
pub trait SheetStore {
    /// Name of the worksheet, for logs and reports
    fn sheet_name(&self) -> &str;

    /// Number of rows in the used range
    fn row_count(&self) -> Result<usize>;

    /// Reads rows `1..=rows` of `column`
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot read the range.
    fn read_column(&self, column: Column, rows: usize, mode: ReadMode) -> Result<Vec<CellValue>>;

    /// Writes `values` to rows `1..=values.len()` of `column`
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the write.
    fn write_column(&mut self, column: Column, values: &[CellValue]) -> Result<()>;

    /// Sets the number format of a single cell
    fn set_cell_format(&mut self, address: CellAddress, pattern: &str) -> Result<()>;

    /// Sets the number format of rows `1..=rows` of `column`
    fn set_column_number_format(&mut self, column: Column, rows: usize, pattern: &str)
        -> Result<()>;
}
