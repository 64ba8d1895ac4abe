//! Cell-level types shared by the rules and the spreadsheet adapters
//!
//! Columns and addresses are A1-style. Rows are 1-based throughout, matching
//! what the user sees in the spreadsheet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display pattern for calendar dates written by the updater
pub const DATE_DISPLAY: &str = "%Y/%m/%d";

/// Spreadsheet column, stored as a 1-based index
///
/// # Examples
///
/// ```
/// use meteo::domain::Column;
///
/// let column = Column::from_index(28);
/// assert_eq!(column.to_string(), "AB");
/// assert_eq!(column.at(4).to_string(), "AB4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Column(u32);

impl Column {
    /// Creates a column from its 1-based index (`1` is `A`)
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Returns the 1-based column index
    pub fn index(&self) -> u32 {
        self.0
    }

    /// Address of this column at the given 1-based row
    pub fn at(&self, row: u32) -> CellAddress {
        CellAddress::new(*self, row)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut n = self.0;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            letters.push((b'A' + rem) as char);
            n = (n - 1) / 26;
        }
        let letters: String = letters.into_iter().rev().collect();
        write!(f, "{letters}")
    }
}

/// A1-style cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    /// Column of the cell
    pub column: Column,
    /// 1-based row of the cell
    pub row: u32,
}

impl CellAddress {
    /// Creates an address from a column and a 1-based row
    pub fn new(column: Column, row: u32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Content of a single cell as the updater sees it
///
/// `Formula` holds the formula text without the leading `=` and is written
/// back verbatim, so formulas on rows the rules don't touch survive a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Formula(String),
}

impl CellValue {
    /// Shorthand for a text cell
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Date(d) => write!(f, "{}", d.format(DATE_DISPLAY)),
            CellValue::Formula(formula) => write!(f, "={formula}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}
