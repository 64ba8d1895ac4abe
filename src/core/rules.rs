//! Row classification rules
//!
//! Each row's SAP target code (column C) is matched against an ordered table
//! of [`ClassificationRule`]s. Rules are evaluated top-down and the first
//! match wins. A code that matches nothing leaves its row untouched.
//!
//! The predicates are mutually exclusive by construction except for `PA8`,
//! which appears both as its own rule and in [`TODAY_CODES`]. The dedicated
//! rule comes first, so the `TODAY_CODES` entry never fires. It is kept so
//! the table mirrors the list the planning team maintains.

use super::dates::RunDates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Codes whose tasks are reported with yesterday's date
pub const YESTERDAY_CODES: [&str; 23] = [
    "P35", "P37", "P48", "P50", "PBO", "PBW", "PJ0", "PJ4", "PQ6", "PQ4", "PX0", "PX2", "PX4",
    "PY6", "PY8", "PC2", "PC0", "PD2", "PD0", "P01", "P83", "PK2", "PK0",
];

/// Codes whose tasks are reported with today's date
pub const TODAY_CODES: [&str; 2] = ["PA8", "P78"];

/// Status written to every updated row
pub const STATUS_OK: &str = "OK";

/// Start time written to column G for `PA8`
pub const PA8_START_TIME: &str = "4:59";

/// Counter value written for `PA8`
pub const PA8_COUNTER: i64 = 9999;

/// Stable identifier of a rule, used in logs and run summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Pr1,
    YesterdayCodes,
    Pa8,
    TodayCodes,
    P85,
    Ps1Pbi,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::Pr1 => "pr1",
            RuleId::YesterdayCodes => "yesterday_codes",
            RuleId::Pa8 => "pa8",
            RuleId::TodayCodes => "today_codes",
            RuleId::P85 => "p85",
            RuleId::Ps1Pbi => "ps1_pbi",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule matches a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatch {
    Exact(&'static str),
    OneOf(&'static [&'static str]),
}

impl CodeMatch {
    pub fn matches(&self, code: &str) -> bool {
        match self {
            CodeMatch::Exact(expected) => code == *expected,
            CodeMatch::OneOf(set) => set.contains(&code),
        }
    }
}

/// Condition on the run dates under which a matched rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// Rows stay "Non Planifiée" on Sundays
    NotSunday,
}

impl Guard {
    pub fn allows(&self, dates: &RunDates) -> bool {
        match self {
            Guard::Always => true,
            Guard::NotSunday => !dates.is_sunday(),
        }
    }
}

/// Bundle of values written to a matched row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// OK, dated today, counter 0, G/H cleared
    TodayZero,
    /// OK, dated yesterday, counter 0, G/H cleared
    YesterdayZero,
    /// OK, dated today, counter 9999, G set to the start time, H cleared
    TodayMaxCounter,
}

/// Extra side effect applied on top of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    None,
    /// Counter cell number format reset to `General`
    GeneralCounterFormat,
    /// Columns K, L and M cleared
    ClearExtras,
}

/// Concrete values an outcome writes for a given run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub status: &'static str,
    pub start_date: NaiveDate,
    pub counter: i64,
    pub end_date: NaiveDate,
    /// `None` clears column G
    pub start_time: Option<&'static str>,
}

impl Outcome {
    /// Resolves the outcome against the run dates
    pub fn resolve(&self, dates: &RunDates) -> RowUpdate {
        match self {
            Outcome::TodayZero => RowUpdate {
                status: STATUS_OK,
                start_date: dates.today(),
                counter: 0,
                end_date: dates.today(),
                start_time: None,
            },
            Outcome::YesterdayZero => RowUpdate {
                status: STATUS_OK,
                start_date: dates.yesterday(),
                counter: 0,
                end_date: dates.yesterday(),
                start_time: None,
            },
            Outcome::TodayMaxCounter => RowUpdate {
                status: STATUS_OK,
                start_date: dates.today(),
                counter: PA8_COUNTER,
                end_date: dates.today(),
                start_time: Some(PA8_START_TIME),
            },
        }
    }
}

/// One entry of the priority table
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub id: RuleId,
    pub code: CodeMatch,
    pub guard: Guard,
    pub outcome: Outcome,
    pub effect: Effect,
}

/// The rule table, in priority order
pub static RULES: [ClassificationRule; 6] = [
    ClassificationRule {
        id: RuleId::Pr1,
        code: CodeMatch::Exact("PR1"),
        guard: Guard::NotSunday,
        outcome: Outcome::TodayZero,
        effect: Effect::None,
    },
    ClassificationRule {
        id: RuleId::YesterdayCodes,
        code: CodeMatch::OneOf(&YESTERDAY_CODES),
        guard: Guard::Always,
        outcome: Outcome::YesterdayZero,
        effect: Effect::None,
    },
    ClassificationRule {
        id: RuleId::Pa8,
        code: CodeMatch::Exact("PA8"),
        guard: Guard::Always,
        outcome: Outcome::TodayMaxCounter,
        effect: Effect::None,
    },
    ClassificationRule {
        id: RuleId::TodayCodes,
        code: CodeMatch::OneOf(&TODAY_CODES),
        guard: Guard::Always,
        outcome: Outcome::TodayZero,
        effect: Effect::None,
    },
    ClassificationRule {
        id: RuleId::P85,
        code: CodeMatch::Exact("P85"),
        guard: Guard::Always,
        outcome: Outcome::YesterdayZero,
        effect: Effect::GeneralCounterFormat,
    },
    ClassificationRule {
        id: RuleId::Ps1Pbi,
        code: CodeMatch::OneOf(&["PS1", "PBI"]),
        guard: Guard::Always,
        outcome: Outcome::YesterdayZero,
        effect: Effect::ClearExtras,
    },
];

/// Result of classifying one row
#[derive(Debug, Clone, Copy)]
pub enum Classification {
    /// A rule matched and its outcome applies
    Apply(&'static ClassificationRule),
    /// A rule matched but its guard held the row back
    Held(&'static ClassificationRule),
    /// No rule matched
    Unmatched,
}

/// Classifies a single code against [`RULES`]
///
/// Matching is exact: surrounding whitespace and case are significant.
///
/// # Examples
///
/// ```
/// use meteo::core::dates::RunDates;
/// use meteo::core::rules::{classify, Classification, RuleId};
/// use chrono::NaiveDate;
///
/// let dates = RunDates::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap();
/// match classify("P78", &dates) {
///     Classification::Apply(rule) => assert_eq!(rule.id, RuleId::TodayCodes),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn classify(code: &str, dates: &RunDates) -> Classification {
    match RULES.iter().find(|rule| rule.code.matches(code)) {
        Some(rule) if rule.guard.allows(dates) => Classification::Apply(rule),
        Some(rule) => Classification::Held(rule),
        None => Classification::Unmatched,
    }
}
