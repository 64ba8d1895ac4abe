//! Batch update of the "Compte-rendu Météo" worksheet
//!
//! A run has three phases:
//!
//! 1. **Read**: the code column and every output column are read once.
//! 2. **Compute**: each row is classified ([`super::rules::classify`]) and
//!    the resulting values are applied to the in-memory columns.
//! 3. **Write**: the output columns are written back in one pass, then the
//!    per-cell formats and the date column formats are applied.
//!
//! All reads happen before any write.

use super::dates::RunDates;
use super::rules::{classify, Classification, Effect, Outcome, RuleId};
use super::summary::UpdateSummary;
use crate::adapters::store::{ReadMode, SheetStore, DATE_FORMAT, GENERAL_FORMAT};
use crate::domain::{CellValue, Column, Result};
use serde::Serialize;
use std::time::Instant;

/// Column layout of the worksheet
pub mod layout {
    use crate::domain::Column;

    /// SAP target code
    pub const CODE: Column = Column::from_index(3);
    /// Status flag
    pub const STATUS: Column = Column::from_index(5);
    /// Start date
    pub const START_DATE: Column = Column::from_index(6);
    /// Start time, cleared or set to `4:59`
    pub const G: Column = Column::from_index(7);
    /// Cleared on every updated row
    pub const H: Column = Column::from_index(8);
    /// Counter
    pub const COUNTER: Column = Column::from_index(9);
    /// End date
    pub const END_DATE: Column = Column::from_index(10);
    /// Cleared for `PS1` and `PBI`
    pub const EXTRAS: [Column; 3] = [
        Column::from_index(11),
        Column::from_index(12),
        Column::from_index(13),
    ];
}

/// A row change computed before anything is written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRow {
    /// 1-based row index
    pub row: u32,
    pub code: String,
    pub rule: RuleId,
    pub outcome: Outcome,
    pub effect: Effect,
}

/// Every change a run is going to make
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePlan {
    pub total_rows: usize,
    pub rows: Vec<PlannedRow>,
    /// `PR1` rows left untouched because the run fell on a Sunday
    pub held_on_sunday: Vec<u32>,
    pub unmatched_rows: usize,
}

impl UpdatePlan {
    /// True when at least one row needs columns K to M
    fn clears_extras(&self) -> bool {
        self.rows.iter().any(|row| row.effect == Effect::ClearExtras)
    }

    /// Summary of what applying this plan changes
    pub fn summarize(&self, dates: &RunDates) -> UpdateSummary {
        let mut summary = UpdateSummary::new(dates);
        summary.total_rows = self.total_rows;
        summary.held_on_sunday = self.held_on_sunday.len();
        summary.unmatched_rows = self.unmatched_rows;
        for planned in &self.rows {
            summary.record_update(planned.rule);
        }
        summary
    }
}

/// Classifies every code of the code column
///
/// `codes[0]` is row 1.
pub fn plan_update(codes: &[CellValue], dates: &RunDates) -> UpdatePlan {
    let mut plan = UpdatePlan {
        total_rows: codes.len(),
        rows: Vec::new(),
        held_on_sunday: Vec::new(),
        unmatched_rows: 0,
    };

    for (i, value) in codes.iter().enumerate() {
        let row = i as u32 + 1;
        let code = value.to_string();

        match classify(&code, dates) {
            Classification::Apply(rule) => {
                tracing::debug!(row, code = %code, rule = %rule.id, "Row matched");
                plan.rows.push(PlannedRow {
                    row,
                    code,
                    rule: rule.id,
                    outcome: rule.outcome,
                    effect: rule.effect,
                });
            }
            Classification::Held(rule) => {
                tracing::debug!(row, code = %code, rule = %rule.id, "Row held on Sunday");
                plan.held_on_sunday.push(row);
            }
            Classification::Unmatched => {
                tracing::trace!(row, code = %code, "No rule for code");
                plan.unmatched_rows += 1;
            }
        }
    }

    plan
}

/// Reads the code column and plans the run without writing anything
pub fn preview_update<S: SheetStore + ?Sized>(store: &S, dates: &RunDates) -> Result<UpdatePlan> {
    let rows = store.row_count()?;
    let codes = store.read_column(layout::CODE, rows, ReadMode::Values)?;
    Ok(plan_update(&codes, dates))
}

/// In-memory copy of the output columns
struct OutputColumns {
    status: Vec<CellValue>,
    start_date: Vec<CellValue>,
    g: Vec<CellValue>,
    h: Vec<CellValue>,
    counter: Vec<CellValue>,
    end_date: Vec<CellValue>,
    extras: Option<Vec<Vec<CellValue>>>,
}

impl OutputColumns {
    fn read<S: SheetStore + ?Sized>(store: &S, rows: usize, with_extras: bool) -> Result<Self> {
        let read = |column: Column| store.read_column(column, rows, ReadMode::Contents);
        let extras = if with_extras {
            Some(
                layout::EXTRAS
                    .iter()
                    .map(|column| read(*column))
                    .collect::<Result<Vec<_>>>()?,
            )
        } else {
            None
        };

        Ok(Self {
            status: read(layout::STATUS)?,
            start_date: read(layout::START_DATE)?,
            g: read(layout::G)?,
            h: read(layout::H)?,
            counter: read(layout::COUNTER)?,
            end_date: read(layout::END_DATE)?,
            extras,
        })
    }

    fn apply(&mut self, planned: &PlannedRow, dates: &RunDates) {
        let i = planned.row as usize - 1;
        let update = planned.outcome.resolve(dates);

        self.status[i] = CellValue::text(update.status);
        self.start_date[i] = CellValue::Date(update.start_date);
        self.counter[i] = CellValue::Number(update.counter as f64);
        self.end_date[i] = CellValue::Date(update.end_date);
        self.g[i] = update
            .start_time
            .map(CellValue::text)
            .unwrap_or(CellValue::Empty);
        self.h[i] = CellValue::Empty;

        if planned.effect == Effect::ClearExtras {
            if let Some(extras) = self.extras.as_mut() {
                for column in extras.iter_mut() {
                    column[i] = CellValue::Empty;
                }
            }
        }
    }

    fn write<S: SheetStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.write_column(layout::STATUS, &self.status)?;
        store.write_column(layout::START_DATE, &self.start_date)?;
        store.write_column(layout::G, &self.g)?;
        store.write_column(layout::H, &self.h)?;
        store.write_column(layout::COUNTER, &self.counter)?;
        store.write_column(layout::END_DATE, &self.end_date)?;
        if let Some(extras) = &self.extras {
            for (column, values) in layout::EXTRAS.iter().zip(extras) {
                store.write_column(*column, values)?;
            }
        }
        Ok(())
    }
}

/// Applies a plan to the store
///
/// The plan must have been computed from the same store and dates.
pub fn apply_plan<S: SheetStore + ?Sized>(
    store: &mut S,
    plan: &UpdatePlan,
    dates: &RunDates,
) -> Result<UpdateSummary> {
    let summary = plan.summarize(dates);

    if plan.total_rows == 0 {
        tracing::info!("Sheet has no used rows, nothing to update");
        return Ok(summary);
    }

    let mut columns = OutputColumns::read(store, plan.total_rows, plan.clears_extras())?;
    for planned in &plan.rows {
        columns.apply(planned, dates);
    }

    columns.write(store)?;

    for planned in &plan.rows {
        if planned.effect == Effect::GeneralCounterFormat {
            let address = layout::COUNTER.at(planned.row);
            tracing::debug!(cell = %address, "Counter format reset to General");
            store.set_cell_format(address, GENERAL_FORMAT)?;
        }
    }

    store.set_column_number_format(layout::START_DATE, plan.total_rows, DATE_FORMAT)?;
    store.set_column_number_format(layout::END_DATE, plan.total_rows, DATE_FORMAT)?;

    Ok(summary)
}

/// Runs the full update against `store`
///
/// # Examples
///
/// ```
/// use meteo::adapters::memory::MemorySheet;
/// use meteo::core::dates::RunDates;
/// use meteo::core::updater::{layout, run_update};
/// use meteo::domain::CellValue;
/// use chrono::NaiveDate;
///
/// let mut sheet = MemorySheet::with_codes("Compte-rendu Météo", layout::CODE, &["P78"]);
/// let dates = RunDates::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap();
///
/// let summary = run_update(&mut sheet, &dates).unwrap();
/// assert_eq!(summary.updated_rows, 1);
/// assert_eq!(sheet.get(layout::STATUS.at(1)), CellValue::text("OK"));
/// ```
pub fn run_update<S: SheetStore + ?Sized>(store: &mut S, dates: &RunDates) -> Result<UpdateSummary> {
    let started = Instant::now();
    crate::log_update_start!(store.sheet_name(), dates);

    let plan = preview_update(store, dates)?;
    let summary = apply_plan(store, &plan, dates)?.with_duration(started.elapsed());

    crate::log_update_complete!(summary.updated_rows, summary.total_rows, started.elapsed());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemorySheet;
    use chrono::NaiveDate;

    fn dates(y: i32, m: u32, d: u32) -> RunDates {
        RunDates::new(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_plan_counts() {
        let codes: Vec<CellValue> = ["P35", "PR1", "XYZ", "PA8", ""]
            .into_iter()
            .map(CellValue::from)
            .collect();
        let plan = plan_update(&codes, &dates(2024, 6, 16));

        assert_eq!(plan.total_rows, 5);
        assert_eq!(plan.rows.len(), 2);
        assert_eq!(plan.held_on_sunday, vec![2]);
        assert_eq!(plan.unmatched_rows, 2);
        assert_eq!(plan.rows[1].row, 4);
        assert_eq!(plan.rows[1].rule, RuleId::Pa8);
    }

    #[test]
    fn test_numeric_codes_do_not_match() {
        let plan = plan_update(&[CellValue::Number(35.0)], &dates(2024, 6, 15));
        assert_eq!(plan.unmatched_rows, 1);
    }

    #[test]
    fn test_p85_sets_general_counter_format() {
        let mut sheet = MemorySheet::with_codes("s", layout::CODE, &["P35", "P85"]);
        run_update(&mut sheet, &dates(2024, 6, 15)).unwrap();

        assert_eq!(sheet.format(layout::COUNTER.at(2)), Some(GENERAL_FORMAT));
        assert_eq!(sheet.format(layout::COUNTER.at(1)), None);
        assert_eq!(sheet.get(layout::START_DATE.at(2)), date(2024, 6, 14));
    }

    #[test]
    fn test_extras_only_cleared_for_ps1_pbi() {
        let mut sheet = MemorySheet::with_codes("s", layout::CODE, &["PS1", "P35", "PBI"]);
        for row in 1..=3 {
            for column in layout::EXTRAS {
                sheet.set(column.at(row), CellValue::text("keep?"));
            }
        }

        run_update(&mut sheet, &dates(2024, 6, 15)).unwrap();

        for column in layout::EXTRAS {
            assert_eq!(sheet.get(column.at(1)), CellValue::Empty);
            assert_eq!(sheet.get(column.at(2)), CellValue::text("keep?"));
            assert_eq!(sheet.get(column.at(3)), CellValue::Empty);
        }
    }

    #[test]
    fn test_extras_untouched_without_ps1_pbi() {
        let mut sheet = MemorySheet::with_codes("s", layout::CODE, &["P35"]);
        sheet.set(layout::EXTRAS[0].at(1), CellValue::Formula("NOW()".into()));

        run_update(&mut sheet, &dates(2024, 6, 15)).unwrap();
        assert_eq!(
            sheet.get(layout::EXTRAS[0].at(1)),
            CellValue::Formula("NOW()".into())
        );
    }

    #[test]
    fn test_date_formats_cover_whole_range() {
        let mut sheet = MemorySheet::with_codes("s", layout::CODE, &["XYZ", "ABC"]);
        run_update(&mut sheet, &dates(2024, 6, 15)).unwrap();

        for row in 1..=2 {
            assert_eq!(sheet.format(layout::START_DATE.at(row)), Some(DATE_FORMAT));
            assert_eq!(sheet.format(layout::END_DATE.at(row)), Some(DATE_FORMAT));
        }
    }

    #[test]
    fn test_empty_sheet_is_success() {
        let mut sheet = MemorySheet::new("s");
        let summary = run_update(&mut sheet, &dates(2024, 6, 15)).unwrap();
        assert_eq!(summary.total_rows, 0);
        assert!(summary.is_noop());
        assert_eq!(sheet, MemorySheet::new("s"));
    }

    #[test]
    fn test_unmatched_formulas_survive() {
        let mut sheet = MemorySheet::with_codes("s", layout::CODE, &["XYZ", "P78"]);
        sheet.set(layout::COUNTER.at(1), CellValue::Formula("A1*2".into()));
        sheet.set(layout::COUNTER.at(2), CellValue::Formula("A2*2".into()));

        run_update(&mut sheet, &dates(2024, 6, 15)).unwrap();

        assert_eq!(sheet.get(layout::COUNTER.at(1)), CellValue::Formula("A1*2".into()));
        assert_eq!(sheet.get(layout::COUNTER.at(2)), CellValue::Number(0.0));
    }

    #[test]
    fn test_preview_writes_nothing() {
        let sheet = MemorySheet::with_codes("s", layout::CODE, &["P35", "PA8"]);
        let before = sheet.clone();
        let plan = preview_update(&sheet, &dates(2024, 6, 15)).unwrap();

        assert_eq!(plan.rows.len(), 2);
        assert_eq!(sheet, before);
    }
}
