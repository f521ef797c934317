//! Decoded DTSTART/DTEND values.

use chrono::NaiveDate;

use super::{DateTime, Property, Value};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::expand::to_display_date;

/// A DTSTART or DTEND value, tagged by whether it carries a time of day.
///
/// The parser decides the variant: `VALUE=DATE`, or a bare 8-character value
/// with no `T`, is a date; anything else is a date-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayValue {
    /// All-day value.
    DateOnly(NaiveDate),
    /// Timed value.
    DateTime(DateTime),
}

impl DayValue {
    /// ## Summary
    /// Reads a property's parsed value as a `DayValue`.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidDate` if the property holds neither a DATE
    /// nor a DATE-TIME, or the DATE does not exist.
    pub fn from_property(prop: &Property) -> RfcResult<Self> {
        match &prop.value {
            Value::Date(d) => d
                .to_naive()
                .map(Self::DateOnly)
                .ok_or_else(|| RfcError::InvalidDate(format!("{}:{d}", prop.name))),
            Value::DateTime(dt) => Ok(Self::DateTime(dt.clone())),
            _ => Err(RfcError::InvalidDate(format!(
                "{} is not a date: {}",
                prop.name, prop.raw_value
            ))),
        }
    }

    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        matches!(self, Self::DateOnly(_))
    }

    /// ## Summary
    /// Returns the calendar day this value falls on in the display timezone.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidDate` if a date-time cannot be placed.
    pub fn date(&self) -> RfcResult<NaiveDate> {
        match self {
            Self::DateOnly(d) => Ok(*d),
            Self::DateTime(dt) => to_display_date(dt),
        }
    }
}
