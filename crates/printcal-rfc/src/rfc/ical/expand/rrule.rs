//! Recurrence sets for all-day events, built with the `rrule` crate.
//!
//! Every instant handed to `rrule` is midnight in the display timezone, so
//! each produced occurrence maps to exactly one calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use printcal_core::constants::{DISPLAY_TIMEZONE, DISPLAY_TZ};
use rrule::RRuleSet;

use super::timezone::{end_of_day, start_of_day, to_display_instant};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{RRule, RRuleUntil};

fn rrule_tz(dt: DateTime<Tz>) -> DateTime<rrule::Tz> {
    dt.with_timezone(&rrule::Tz::Tz(DISPLAY_TZ))
}

/// Returns the last instant the rule may produce, in the display timezone.
///
/// A DATE UNTIL covers that whole day.
fn until_instant(until: &RRuleUntil) -> RfcResult<DateTime<Tz>> {
    match until {
        RRuleUntil::Date(d) => {
            let date = d
                .to_naive()
                .ok_or_else(|| RfcError::InvalidDate(format!("UNTIL={d}")))?;
            end_of_day(date)
        }
        RRuleUntil::DateTime(dt) => to_display_instant(dt),
    }
}

/// ## Summary
/// Builds the recurrence set of an all-day event starting on `dtstart`.
///
/// RDATE and EXDATE days are added and removed as midnight instants. When
/// UNTIL falls before DTSTART the set holds DTSTART alone.
///
/// ## Errors
/// Returns `RfcError::RRuleError` if `rrule` rejects the rule, and
/// `RfcError::InvalidDate` if a day boundary cannot be placed.
#[tracing::instrument(skip(rule, rdates, exdates), fields(rule = %rule))]
pub fn build_rrule_set(
    rule: &RRule,
    dtstart: NaiveDate,
    rdates: &[NaiveDate],
    exdates: &[NaiveDate],
) -> RfcResult<RRuleSet> {
    let start = start_of_day(dtstart)?;

    let mut core_rule = rule.clone();
    let until = core_rule.until.take().map(|u| until_instant(&u)).transpose()?;

    let mut set = match until {
        Some(until) if until < start => {
            tracing::debug!(%until, "UNTIL precedes DTSTART, keeping DTSTART only");
            RRuleSet::new(rrule_tz(start)).rdate(rrule_tz(start))
        }
        _ => {
            let mut rule_text = core_rule.to_string();
            if let Some(until) = until {
                let utc = until.with_timezone(&Utc);
                rule_text.push_str(&format!(";UNTIL={}", utc.format("%Y%m%dT%H%M%SZ")));
            }
            format!(
                "DTSTART;TZID={DISPLAY_TIMEZONE}:{}\nRRULE:{rule_text}",
                dtstart.format("%Y%m%dT000000")
            )
            .parse::<RRuleSet>()?
        }
    };

    for day in rdates {
        set = set.rdate(rrule_tz(start_of_day(*day)?));
    }
    for day in exdates {
        set = set.exdate(rrule_tz(start_of_day(*day)?));
    }

    Ok(set)
}

/// ## Summary
/// Lazily yields the calendar days of `set` whose occurrence instant lies in
/// `[start, end]`.
///
/// Occurrences before `start` are skipped and iteration stops at the first one
/// past `end`, so unbounded rules are never fully materialized. A day is
/// yielded once even if a sub-daily rule produces several instants on it.
pub fn occurrence_days(
    set: &RRuleSet,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
) -> impl Iterator<Item = NaiveDate> + '_ {
    let mut last = None;
    set.into_iter()
        .map(|dt| dt.with_timezone(&DISPLAY_TZ))
        .skip_while(move |dt| *dt < start)
        .take_while(move |dt| *dt <= end)
        .map(|dt| dt.date_naive())
        .filter(move |day| {
            let fresh = last != Some(*day);
            last = Some(*day);
            fresh
        })
}
