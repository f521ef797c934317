//! Projects all-day source events onto a resolved interval.
//!
//! Recurring events yield one record per occurrence day. Other events yield
//! one record per covered day, clipped to the interval.

use chrono::{Days, NaiveDate};
use printcal_rfc::rfc::ical::expand::occurrence_days;
use printcal_rfc::rfc::ical::parse;

use crate::error::ExpandResult;
use crate::event::{SourceEvent, decode_events};
use crate::occurrence::Occurrence;
use crate::range::Interval;

/// Records and multi-day count from a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub records: Vec<Occurrence>,
    pub multi_day_count: usize,
}

/// ## Summary
/// Parses calendar text and decodes its all-day events.
///
/// ## Errors
/// Returns `ExpandError::Parse` for malformed text and
/// `ExpandError::Recurrence` for an event that cannot be decoded.
#[tracing::instrument(skip(calendar_text), fields(len = calendar_text.len()))]
pub fn all_day_events(calendar_text: &str) -> ExpandResult<Vec<SourceEvent>> {
    let calendar = parse(calendar_text)?;
    let mut events = decode_events(&calendar)?;
    events.retain(|e| e.is_all_day);
    tracing::debug!(count = events.len(), "All-day events");
    Ok(events)
}

/// ## Summary
/// Expands the all-day events of `calendar_text` into per-day records
/// within `interval`.
///
/// Records follow source-event order; a recurring event's records are
/// chronological.
///
/// ## Errors
/// Fails on the first parse or decoding error, without partial results.
pub fn expand(calendar_text: &str, interval: &Interval) -> ExpandResult<Vec<Occurrence>> {
    Ok(expand_events(&all_day_events(calendar_text)?, interval))
}

/// ## Summary
/// Counts non-recurring all-day events that overlap `interval` and cover
/// more than one day.
///
/// ## Errors
/// Fails on the first parse or decoding error.
pub fn count_multi_day_spanning(calendar_text: &str, interval: &Interval) -> ExpandResult<usize> {
    Ok(count_multi_day(&all_day_events(calendar_text)?, interval))
}

/// ## Summary
/// Expands and counts in one pass over the parsed calendar.
///
/// ## Errors
/// Fails on the first parse or decoding error.
#[tracing::instrument(skip(calendar_text), fields(start = %interval.start, end = %interval.end))]
pub fn render(calendar_text: &str, interval: &Interval) -> ExpandResult<Expansion> {
    let events = all_day_events(calendar_text)?;
    let expansion = Expansion {
        records: expand_events(&events, interval),
        multi_day_count: count_multi_day(&events, interval),
    };
    tracing::debug!(
        records = expansion.records.len(),
        multi_day = expansion.multi_day_count,
        "Expanded calendar"
    );
    Ok(expansion)
}

/// Day after the interval's last day.
fn window_end(interval: &Interval) -> NaiveDate {
    let last = interval.last_day();
    last.checked_add_days(Days::new(1)).unwrap_or(last)
}

fn expand_events(events: &[SourceEvent], interval: &Interval) -> Vec<Occurrence> {
    let mut records = Vec::new();
    for event in events {
        let record = |date: NaiveDate| Occurrence {
            date,
            title: event.summary.clone(),
            location: event.location.clone(),
            uid: event.uid.clone(),
        };

        match &event.recurrence {
            Some(recurrence) => {
                records.extend(
                    occurrence_days(&recurrence.set, interval.start, interval.end).map(record),
                );
            }
            None => {
                let from = event.start.max(interval.first_day());
                let to = event.effective_end().min(window_end(interval));
                records.extend(from.iter_days().take_while(|day| *day < to).map(record));
            }
        }
    }
    records
}

fn count_multi_day(events: &[SourceEvent], interval: &Interval) -> usize {
    let first = interval.first_day();
    let end = window_end(interval);
    events
        .iter()
        .filter(|e| e.recurrence.is_none())
        .filter(|e| e.effective_end() > first && e.start < end)
        .filter(|e| e.is_multi_day())
        .count()
}
