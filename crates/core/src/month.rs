//! Calendar months.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors produced while reading a month token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthParseError {
    /// Nothing was supplied.
    #[error("Month is required")]
    Empty,

    /// Input is not `YYYY-MM` (or a full date where one is accepted).
    #[error("Invalid month '{0}': expected YYYY-MM")]
    Format(String),

    /// Year or month number outside the supported calendar.
    #[error("Month out of range: {year:04}-{month:02}")]
    OutOfRange {
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
    },
}

/// A calendar month, e.g. `2024-03`, with its inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    first: NaiveDate,
    last: NaiveDate,
}

impl Month {
    /// Creates a month from a year (1..=9999) and month number (1..=12).
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when either component is outside its range.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        let out_of_range = || MonthParseError::OutOfRange { year, month };

        if !(1..=9999).contains(&year) {
            return Err(out_of_range());
        }

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;

        Ok(Self { first, last })
    }

    /// Returns the month containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for dates outside years 1..=9999.
    pub fn from_date(date: NaiveDate) -> Result<Self, MonthParseError> {
        Self::new(date.year(), date.month())
    }

    /// Parses a budget month.
    ///
    /// Accepts `YYYY-MM`, a `YYYY-MM-DD` date or an RFC 3339 timestamp and
    /// normalizes any of them to the month they fall in.
    ///
    /// # Errors
    ///
    /// Returns an error if the input matches none of the accepted forms.
    pub fn parse_lenient(raw: &str) -> Result<Self, MonthParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MonthParseError::Empty);
        }

        if let Ok(month) = trimmed.parse::<Self>() {
            return Ok(month);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::from_date(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::from_date(ts.date_naive());
        }

        Err(MonthParseError::Format(trimmed.to_string()))
    }

    /// First day of the month. This is the canonical stored value for budgets.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Last day of the month (inclusive).
    #[must_use]
    pub const fn last_day(self) -> NaiveDate {
        self.last
    }

    /// Year component.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// Month number (1-12).
    #[must_use]
    pub fn number(self) -> u32 {
        self.first.month()
    }

    /// Returns true if `date` falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    /// Strict `YYYY-MM` parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MonthParseError::Empty);
        }

        let format_err = || MonthParseError::Format(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(format_err)?;

        let digits =
            |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(month, 2) {
            return Err(format_err());
        }

        let year: i32 = year.parse().map_err(|_| format_err())?;
        let month: u32 = month.parse().map_err(|_| format_err())?;

        Self::new(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.number())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
