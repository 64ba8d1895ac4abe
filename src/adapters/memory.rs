//! In-memory worksheet
//!
//! A sparse grid implementing [`SheetStore`], used to exercise the updater
//! without a workbook on disk. Formulas are stored but never evaluated: reading a formula cell in
//! [`ReadMode::Values`] yields an empty value.

use super::store::{ReadMode, SheetStore};
use crate::domain::{CellAddress, CellValue, Column, Result};
use std::collections::BTreeMap;

/// Sparse in-memory worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySheet {
    name: String,
    cells: BTreeMap<CellAddress, CellValue>,
    formats: BTreeMap<CellAddress, String>,
}

impl MemorySheet {
    /// Creates an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a sheet with `codes` in rows `1..` of `column`
    pub fn with_codes(name: impl Into<String>, column: Column, codes: &[&str]) -> Self {
        let mut sheet = Self::new(name);
        for (i, code) in codes.iter().enumerate() {
            sheet.set(column.at(i as u32 + 1), CellValue::from(*code));
        }
        sheet
    }

    /// Stores a value; storing an empty value removes the cell
    pub fn set(&mut self, address: CellAddress, value: CellValue) {
        if value == CellValue::Empty {
            self.cells.remove(&address);
        } else {
            self.cells.insert(address, value);
        }
    }

    /// Value of a cell, `Empty` when never written
    pub fn get(&self, address: CellAddress) -> CellValue {
        self.cells.get(&address).cloned().unwrap_or_default()
    }

    /// Number format of a cell, if one was set
    pub fn format(&self, address: CellAddress) -> Option<&str> {
        self.formats.get(&address).map(String::as_str)
    }
}

impl SheetStore for MemorySheet {
    fn sheet_name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> Result<usize> {
        Ok(self
            .cells
            .keys()
            .map(|address| address.row as usize)
            .max()
            .unwrap_or(0))
    }

    fn read_column(&self, column: Column, rows: usize, mode: ReadMode) -> Result<Vec<CellValue>> {
        Ok((1..=rows as u32)
            .map(|row| match (self.get(column.at(row)), mode) {
                (CellValue::Formula(_), ReadMode::Values) => CellValue::Empty,
                (value, _) => value,
            })
            .collect())
    }

    fn write_column(&mut self, column: Column, values: &[CellValue]) -> Result<()> {
        for (i, value) in values.iter().enumerate() {
            self.set(column.at(i as u32 + 1), value.clone());
        }
        Ok(())
    }

    fn set_cell_format(&mut self, address: CellAddress, pattern: &str) -> Result<()> {
        self.formats.insert(address, pattern.to_string());
        Ok(())
    }

    fn set_column_number_format(
        &mut self,
        column: Column,
        rows: usize,
        pattern: &str,
    ) -> Result<()> {
        for row in 1..=rows as u32 {
            self.formats.insert(column.at(row), pattern.to_string());
        }
        Ok(())
    }
}
