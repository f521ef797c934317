//! Source events decoded from VEVENT components.

use chrono::{Days, NaiveDate, TimeDelta};
use printcal_rfc::error::{RfcError, RfcResult};
use printcal_rfc::rfc::ical::core::{Date, RRule, Value, names};
use printcal_rfc::rfc::ical::expand::{build_rrule_set, to_display_date};
use printcal_rfc::rfc::ical::{Component, DayValue, ICalendar, Property};
use rrule::RRuleSet;

use crate::error::{ExpandError, ExpandResult};

/// Recurrence data of an all-day event.
#[derive(Debug, Clone)]
pub struct Recurrence {
    pub rule: RRule,
    pub rdates: Vec<NaiveDate>,
    pub exdates: Vec<NaiveDate>,
    /// The rule applied to DTSTART with RDATE and EXDATE folded in.
    pub set: RRuleSet,
}

/// A VEVENT reduced to what the expander reads.
#[derive(Debug, Clone)]
pub struct SourceEvent {
    pub start: NaiveDate,
    pub is_all_day: bool,
    /// From DTEND, else DTSTART plus the whole days of DURATION. Only
    /// decoded for all-day events.
    pub end: Option<NaiveDate>,
    pub summary: String,
    pub location: String,
    pub uid: String,
    /// Only decoded for all-day events.
    pub recurrence: Option<Recurrence>,
}

impl SourceEvent {
    /// ## Summary
    /// Decodes a VEVENT component.
    ///
    /// Returns `Ok(None)` when the component has no DTSTART. Missing SUMMARY,
    /// LOCATION and UID become empty strings.
    ///
    /// ## Errors
    /// Returns `ExpandError::Recurrence` if DTSTART is not a date, or if an
    /// all-day event has an unreadable DTEND or DURATION or a recurrence rule
    /// that cannot be built.
    pub fn from_component(component: &Component) -> ExpandResult<Option<Self>> {
        let uid = component.uid().unwrap_or_default();
        let with_uid = |e: RfcError| ExpandError::for_event(uid, e);

        let Some(dtstart) = component.get_property(names::DTSTART) else {
            tracing::trace!(uid, "VEVENT has no DTSTART, skipping");
            return Ok(None);
        };
        let start_value = DayValue::from_property(dtstart).map_err(with_uid)?;
        let is_all_day = start_value.is_all_day();
        let start = start_value.date().map_err(with_uid)?;

        let (end, recurrence) = if is_all_day {
            (
                extract_end(component, start).map_err(with_uid)?,
                extract_recurrence(component, start).map_err(with_uid)?,
            )
        } else {
            // Timed events never produce records, so a bad DTEND or rule on one is ignored.
            tracing::trace!(uid, "Timed VEVENT, skipping end and recurrence");
            (None, None)
        };

        Ok(Some(Self {
            start,
            is_all_day,
            end,
            summary: component.summary().unwrap_or_default().to_string(),
            location: component.location().unwrap_or_default().to_string(),
            uid: uid.to_string(),
            recurrence,
        }))
    }

    /// Day after the last covered day: `end`, or the day after `start`.
    #[must_use]
    pub fn effective_end(&self) -> NaiveDate {
        self.end.unwrap_or_else(|| {
            self.start
                .checked_add_days(Days::new(1))
                .unwrap_or(self.start)
        })
    }

    /// Whether a non-recurring event covers more than one day.
    #[must_use]
    pub fn is_multi_day(&self) -> bool {
        self.recurrence.is_none()
            && self.effective_end().signed_duration_since(self.start) > TimeDelta::days(1)
    }
}

/// Reads DTEND, falling back to DTSTART plus DURATION.
fn extract_end(component: &Component, start: NaiveDate) -> RfcResult<Option<NaiveDate>> {
    if let Some(dtend) = component.get_property(names::DTEND) {
        let end = DayValue::from_property(dtend)?.date()?;
        tracing::trace!(%end, "End from DTEND");
        return Ok(Some(end));
    }

    let Some(duration) = component
        .get_property(names::DURATION)
        .and_then(Property::as_duration)
    else {
        return Ok(None);
    };

    let end = TimeDelta::try_days(duration.whole_days())
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| RfcError::InvalidDate(format!("{start} + {duration}")))?;
    tracing::trace!(%end, %duration, "End from DURATION");
    Ok(Some(end))
}

/// Reads RRULE, RDATE and EXDATE and builds the recurrence set.
///
/// Returns `Ok(None)` if there is no RRULE.
fn extract_recurrence(component: &Component, start: NaiveDate) -> RfcResult<Option<Recurrence>> {
    let Some(rule) = component
        .get_property(names::RRULE)
        .and_then(Property::as_recur)
    else {
        return Ok(None);
    };

    let rdates = extract_date_list(component, names::RDATE)?;
    let exdates = extract_date_list(component, names::EXDATE)?;
    let set = build_rrule_set(rule, start, &rdates, &exdates)?;

    Ok(Some(Recurrence {
        rule: rule.clone(),
        rdates,
        exdates,
        set,
    }))
}

/// Collects the days of every RDATE or EXDATE property.
///
/// Date-times contribute their display-timezone day. PERIOD values are
/// skipped.
fn extract_date_list(component: &Component, property_name: &str) -> RfcResult<Vec<NaiveDate>> {
    let mut days = Vec::new();
    for prop in component.get_properties(property_name) {
        match &prop.value {
            Value::Date(d) => days.push(naive(*d)?),
            Value::DateList(list) => {
                for d in list {
                    days.push(naive(*d)?);
                }
            }
            Value::DateTime(dt) => days.push(to_display_date(dt)?),
            Value::DateTimeList(list) => {
                for dt in list {
                    days.push(to_display_date(dt)?);
                }
            }
            _ => tracing::debug!(
                property = property_name,
                value = %prop.raw_value,
                "Skipping unsupported date list value"
            ),
        }
    }
    Ok(days)
}

fn naive(d: Date) -> RfcResult<NaiveDate> {
    d.to_naive().ok_or_else(|| RfcError::InvalidDate(d.to_string()))
}

/// ## Summary
/// Decodes every VEVENT of a calendar, in document order.
///
/// Events without DTSTART are dropped.
///
/// ## Errors
/// Returns the first decoding error.
pub fn decode_events(calendar: &ICalendar) -> ExpandResult<Vec<SourceEvent>> {
    let mut events = Vec::new();
    for component in calendar.root.events() {
        if let Some(event) = SourceEvent::from_component(component)? {
            events.push(event);
        }
    }
    tracing::debug!(count = events.len(), "Decoded source events");
    Ok(events)
}
