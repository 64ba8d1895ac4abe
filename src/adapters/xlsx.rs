//! `.xlsx` workbook adapter
//!
//! Implements [`SheetStore`] over a workbook loaded fully into memory with
//! `umya-spreadsheet`. Changes stay in memory until [`XlsxWorkbook::save`],
//! so a run that fails half way never leaves a partially updated file.

use super::store::{ReadMode, SheetStore};
use crate::domain::{CellAddress, CellValue, Column, MeteoError, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Cell, Spreadsheet, Worksheet};

/// Day zero of the Excel 1900 date system, as used by serial numbers
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Converts a calendar date to an Excel serial number
pub fn date_to_serial(date: NaiveDate) -> f64 {
    (date - excel_epoch()).num_days() as f64
}

/// One worksheet of an `.xlsx` workbook
pub struct XlsxWorkbook {
    path: PathBuf,
    sheet_name: String,
    book: Spreadsheet,
}

impl std::fmt::Debug for XlsxWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxWorkbook")
            .field("path", &self.path)
            .field("sheet_name", &self.sheet_name)
            .finish_non_exhaustive()
    }
}

impl XlsxWorkbook {
    /// Opens `path` and selects `sheet_name`
    ///
    /// # Errors
    ///
    /// Returns [`MeteoError::Workbook`] if the file cannot be read and
    /// [`MeteoError::MissingSheet`] if the workbook has no such sheet.
    pub fn open(path: impl AsRef<Path>, sheet_name: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MeteoError::Workbook(format!(
                "Workbook not found: {}",
                path.display()
            )));
        }

        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            MeteoError::Workbook(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::from_spreadsheet(path, book, sheet_name)
    }

    /// Wraps an already loaded spreadsheet
    pub fn from_spreadsheet(
        path: impl Into<PathBuf>,
        book: Spreadsheet,
        sheet_name: &str,
    ) -> Result<Self> {
        if book.get_sheet_by_name(sheet_name).is_none() {
            return Err(MeteoError::MissingSheet(sheet_name.to_string()));
        }

        Ok(Self {
            path: path.into(),
            sheet_name: sheet_name.to_string(),
            book,
        })
    }

    /// Path the workbook was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the workbook to `output`, or back to its source path
    pub fn save(&self, output: Option<&Path>) -> Result<PathBuf> {
        let target = output.unwrap_or(&self.path).to_path_buf();
        umya_spreadsheet::writer::xlsx::write(&self.book, &target).map_err(|e| {
            MeteoError::Workbook(format!("Failed to write {}: {e}", target.display()))
        })?;
        tracing::info!(path = %target.display(), "Workbook saved");
        Ok(target)
    }

    fn sheet(&self) -> Result<&Worksheet> {
        self.book
            .get_sheet_by_name(&self.sheet_name)
            .ok_or_else(|| MeteoError::MissingSheet(self.sheet_name.clone()))
    }

    fn sheet_mut(&mut self) -> Result<&mut Worksheet> {
        let name = self.sheet_name.clone();
        self.book
            .get_sheet_by_name_mut(&name)
            .ok_or(MeteoError::MissingSheet(name))
    }
}

fn read_cell(cell: Option<&Cell>, mode: ReadMode) -> CellValue {
    let Some(cell) = cell else {
        return CellValue::Empty;
    };

    if mode == ReadMode::Contents && !cell.get_formula().is_empty() {
        return CellValue::Formula(cell.get_formula().to_string());
    }

    let value = cell.get_value();
    if value.is_empty() {
        CellValue::Empty
    } else if let Some(number) = cell.get_value_number() {
        CellValue::Number(number)
    } else {
        CellValue::Text(value.into_owned())
    }
}

fn write_cell(cell: &mut Cell, value: &CellValue) {
    match value {
        CellValue::Empty => {
            cell.set_value_string("");
        }
        CellValue::Text(text) => {
            cell.set_value_string(text.as_str());
        }
        CellValue::Number(number) => {
            cell.set_value_number(*number);
        }
        CellValue::Date(date) => {
            cell.set_value_number(date_to_serial(*date));
        }
        CellValue::Formula(formula) => {
            cell.set_formula(formula.as_str());
        }
    }
}

impl SheetStore for XlsxWorkbook {
    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn row_count(&self) -> Result<usize> {
        Ok(self.sheet()?.get_highest_row() as usize)
    }

    fn read_column(&self, column: Column, rows: usize, mode: ReadMode) -> Result<Vec<CellValue>> {
        let sheet = self.sheet()?;
        Ok((1..=rows as u32)
            .map(|row| read_cell(sheet.get_cell((column.index(), row)), mode))
            .collect())
    }

    fn write_column(&mut self, column: Column, values: &[CellValue]) -> Result<()> {
        let sheet = self.sheet_mut()?;
        for (i, value) in values.iter().enumerate() {
            let coordinate = (column.index(), i as u32 + 1);
            // Untouched cells keep their original representation.
            if read_cell(sheet.get_cell(coordinate), ReadMode::Contents) == *value {
                continue;
            }
            write_cell(sheet.get_cell_mut(coordinate), value);
        }
        Ok(())
    }

    fn set_cell_format(&mut self, address: CellAddress, pattern: &str) -> Result<()> {
        self.sheet_mut()?
            .get_style_mut((address.column.index(), address.row))
            .get_number_format_mut()
            .set_format_code(pattern);
        Ok(())
    }

    fn set_column_number_format(
        &mut self,
        column: Column,
        rows: usize,
        pattern: &str,
    ) -> Result<()> {
        let sheet = self.sheet_mut()?;
        for row in 1..=rows as u32 {
            sheet
                .get_style_mut((column.index(), row))
                .get_number_format_mut()
                .set_format_code(pattern);
        }
        Ok(())
    }
}
