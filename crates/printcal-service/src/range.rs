//! Named periods and their day-level intervals in the display timezone.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use printcal_rfc::rfc::ical::expand::{end_of_day, start_of_day};
use serde::Serialize;

use crate::error::{RangeError, RangeResult};

/// A month and day-of-month, placed in a year on resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    #[must_use]
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// Returns this day in `year`, or `None` if it does not exist.
    #[must_use]
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

/// A named date range template, interpreted within a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDefinition {
    pub name: &'static str,
    pub start: MonthDay,
    pub end: MonthDay,
}

/// Configured periods, in display order.
pub const PERIODS: &[PeriodDefinition] = &[
    PeriodDefinition {
        name: "spring",
        start: MonthDay::new(1, 1),
        end: MonthDay::new(5, 31),
    },
    PeriodDefinition {
        name: "summer",
        start: MonthDay::new(6, 1),
        end: MonthDay::new(8, 31),
    },
    PeriodDefinition {
        name: "fall",
        start: MonthDay::new(9, 1),
        end: MonthDay::new(12, 31),
    },
    PeriodDefinition {
        name: "year",
        start: MonthDay::new(1, 1),
        end: MonthDay::new(12, 31),
    },
];

/// A resolved `[start, end]` interval.
///
/// `start` is midnight of the first day and `end` is 23:59:59.999 of the last
/// day, both in the display timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Interval {
    /// ## Summary
    /// Builds the interval covering `first` through `last`, inclusive.
    ///
    /// ## Errors
    /// Returns `RangeError::InvalidDate` if a day boundary cannot be placed.
    pub fn from_days(first: NaiveDate, last: NaiveDate) -> RangeResult<Self> {
        let start = start_of_day(first).map_err(|e| RangeError::InvalidDate(e.to_string()))?;
        let end = end_of_day(last).map_err(|e| RangeError::InvalidDate(e.to_string()))?;
        Ok(Self { start, end })
    }

    /// First calendar day of the interval.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Last calendar day of the interval.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.end.date_naive()
    }
}

/// Lists the configured period names in table order.
#[must_use]
pub fn period_names() -> impl Iterator<Item = &'static str> {
    PERIODS.iter().map(|p| p.name)
}

/// ## Summary
/// Resolves a named period within `year` to a concrete interval.
///
/// Names match case-insensitively.
///
/// ## Errors
/// - `RangeError::UnknownPeriod` if no period has that name.
/// - `RangeError::InvalidDate` if a boundary day does not exist in `year`.
/// - `RangeError::InvertedPeriod` if the period ends before it starts.
pub fn resolve(year: i32, period_name: &str) -> RangeResult<Interval> {
    resolve_with(PERIODS, year, period_name)
}

#[tracing::instrument(skip(table))]
fn resolve_with(
    table: &[PeriodDefinition],
    year: i32,
    period_name: &str,
) -> RangeResult<Interval> {
    let wanted = period_name.trim();
    let period = table
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| RangeError::UnknownPeriod(wanted.to_string()))?;

    let place = |md: MonthDay| {
        md.in_year(year).ok_or_else(|| {
            RangeError::InvalidDate(format!("{year}-{:02}-{:02}", md.month, md.day))
        })
    };
    let first = place(period.start)?;
    let last = place(period.end)?;

    if last < first {
        return Err(RangeError::InvertedPeriod {
            name: period.name,
            year,
        });
    }

    let interval = Interval::from_days(first, last)?;
    tracing::debug!(start = %interval.start, end = %interval.end, "Resolved period");
    Ok(interval)
}
