//! Reference dates for a run
//!
//! `today` and `yesterday` are computed once and shared by every row. The
//! reference date is always injected; [`Clock`] only decides where the CLI
//! reads it from when no explicit date is given.

use crate::domain::{MeteoError, Result, DATE_DISPLAY};
use chrono::{Datelike, Local, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source of "today" when the caller does not supply a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// Calendar date in UTC
    #[default]
    Utc,
    /// Calendar date in the local time zone
    Local,
}

impl Clock {
    /// Current calendar date according to this clock
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Utc => Utc::now().date_naive(),
            Clock::Local => Local::now().date_naive(),
        }
    }
}

impl FromStr for Clock {
    type Err = MeteoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(MeteoError::Configuration(format!(
                "Invalid clock: {s}. Expected 'utc' or 'local'"
            ))),
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clock::Utc => write!(f, "utc"),
            Clock::Local => write!(f, "local"),
        }
    }
}

/// Dates shared by all rows of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDates {
    today: NaiveDate,
    yesterday: NaiveDate,
}

impl RunDates {
    /// Builds the run dates from the reference day
    ///
    /// # Errors
    ///
    /// Returns a validation error for the minimum representable date, which
    /// has no previous day.
    pub fn new(today: NaiveDate) -> Result<Self> {
        let yesterday = today.pred_opt().ok_or_else(|| {
            MeteoError::Validation(format!("no calendar day precedes {today}"))
        })?;
        Ok(Self { today, yesterday })
    }

    /// Run dates for the current day of `clock`
    pub fn from_clock(clock: Clock) -> Result<Self> {
        Self::new(clock.today())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn yesterday(&self) -> NaiveDate {
        self.yesterday
    }

    /// Day of week of the reference day
    pub fn weekday(&self) -> Weekday {
        self.today.weekday()
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday() == Weekday::Sun
    }
}

impl fmt::Display for RunDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "today={} yesterday={} ({})",
            self.today.format(DATE_DISPLAY),
            self.yesterday.format(DATE_DISPLAY),
            self.weekday()
        )
    }
}

/// Parses a reference date given as `YYYY-MM-DD` or `YYYY/MM/DD`
pub fn parse_reference_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, DATE_DISPLAY))
        .map_err(|e| {
            MeteoError::Validation(format!(
                "Invalid date '{input}': {e}. Expected YYYY-MM-DD"
            ))
        })
}
