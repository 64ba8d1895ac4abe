//! Update summary and reporting
//!
//! This module defines the structure reporting what a run changed.

use super::dates::RunDates;
use super::rules::RuleId;
use crate::domain::{Result, DATE_DISPLAY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Summary of an update run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSummary {
    /// Rows in the processed range
    pub total_rows: usize,

    /// Rows a rule wrote to
    pub updated_rows: usize,

    /// Updated rows per rule
    pub updated_by_rule: BTreeMap<RuleId, usize>,

    /// `PR1` rows left "Non Planifiée" because the run fell on a Sunday
    pub held_on_sunday: usize,

    /// Rows whose code matched no rule
    pub unmatched_rows: usize,

    /// Reference day, `YYYY/MM/DD`
    pub today: String,

    /// Day before the reference day, `YYYY/MM/DD`
    pub yesterday: String,

    /// Whether the run only planned changes
    pub dry_run: bool,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl UpdateSummary {
    /// Create a new empty summary for the given run dates
    pub fn new(dates: &RunDates) -> Self {
        Self {
            total_rows: 0,
            updated_rows: 0,
            updated_by_rule: BTreeMap::new(),
            held_on_sunday: 0,
            unmatched_rows: 0,
            today: dates.today().format(DATE_DISPLAY).to_string(),
            yesterday: dates.yesterday().format(DATE_DISPLAY).to_string(),
            dry_run: false,
            duration_ms: 0,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Record a row written by `rule`
    pub fn record_update(&mut self, rule: RuleId) {
        self.updated_rows += 1;
        *self.updated_by_rule.entry(rule).or_insert(0) += 1;
    }

    /// Rows written by `rule`
    pub fn updated_for(&self, rule: RuleId) -> usize {
        self.updated_by_rule.get(&rule).copied().unwrap_or(0)
    }

    /// True when the run changed no row
    pub fn is_noop(&self) -> bool {
        self.updated_rows == 0
    }

    /// Writes the summary as pretty JSON
    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
