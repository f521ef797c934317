//! Day boundaries and date projection in the display timezone.
//!
//! Every date the expander emits is a calendar day in
//! [`printcal_core::constants::DISPLAY_TZ`]. DATE-TIME values are projected
//! onto that zone before their date is taken.

use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use printcal_core::constants::DISPLAY_TZ;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{self, DateTimeForm};

/// ## Summary
/// Resolves a TZID to a `chrono_tz::Tz`.
///
/// Strips the `/mozilla.org/` and `/softwarestudio.org/` prefixes some
/// clients emit. Returns `None` for identifiers that are not IANA names.
#[must_use]
pub fn resolve_tzid(tzid: &str) -> Option<Tz> {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);
    Tz::from_str(stripped).ok()
}

/// ## Summary
/// Places a wall-clock time in `tz`.
///
/// A time in a DST fold takes the earlier instant. A time in a DST gap is
/// shifted forward one hour.
///
/// ## Errors
/// Returns `RfcError::InvalidDate` if neither the time nor its shifted form
/// exists in `tz`.
pub fn localize<T: TimeZone>(tz: &T, local: NaiveDateTime) -> RfcResult<DateTime<T>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt),
        LocalResult::None => tz
            .from_local_datetime(&(local + chrono::Duration::hours(1)))
            .earliest()
            .ok_or_else(|| RfcError::InvalidDate(format!("{local} does not exist"))),
    }
}

/// ## Summary
/// Returns 00:00:00.000 of `date` in the display timezone.
///
/// ## Errors
/// Returns `RfcError::InvalidDate` if midnight does not exist on that day.
pub fn start_of_day(date: NaiveDate) -> RfcResult<DateTime<Tz>> {
    localize(&DISPLAY_TZ, date.and_time(NaiveTime::MIN))
}

/// ## Summary
/// Returns 23:59:59.999 of `date` in the display timezone.
///
/// ## Errors
/// Returns `RfcError::InvalidDate` if that instant cannot be represented.
pub fn end_of_day(date: NaiveDate) -> RfcResult<DateTime<Tz>> {
    let last = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| RfcError::InvalidDate(format!("no end of day for {date}")))?;
    localize(&DISPLAY_TZ, last)
}

/// ## Summary
/// Projects a DATE-TIME value onto the display timezone.
///
/// UTC values are converted. Zoned values are placed in their TZID and then
/// converted; an unknown TZID is treated like a floating time. Floating values
/// are read as display-timezone wall clock.
///
/// ## Errors
/// Returns `RfcError::InvalidDate` if the value is not a real date and time.
pub fn to_display_instant(value: &core::DateTime) -> RfcResult<DateTime<Tz>> {
    let naive = value
        .to_naive()
        .ok_or_else(|| RfcError::InvalidDate(value.to_string()))?;

    match &value.form {
        DateTimeForm::Utc => Ok(Utc.from_utc_datetime(&naive).with_timezone(&DISPLAY_TZ)),
        DateTimeForm::Zoned { tzid } => match resolve_tzid(tzid) {
            Some(tz) => Ok(localize(&tz, naive)?.with_timezone(&DISPLAY_TZ)),
            None => {
                tracing::debug!(tzid, "Unknown TZID, reading as display-timezone wall clock");
                localize(&DISPLAY_TZ, naive)
            }
        },
        DateTimeForm::Floating => localize(&DISPLAY_TZ, naive),
    }
}

/// ## Summary
/// Returns the display-timezone calendar day a DATE-TIME value falls on.
///
/// ## Errors
/// Returns `RfcError::InvalidDate` if the value is not a real date and time.
pub fn to_display_date(value: &core::DateTime) -> RfcResult<NaiveDate> {
    Ok(to_display_instant(value)?.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::DateTime as IcalDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_tzid() {
        assert_eq!(resolve_tzid("America/Chicago"), Some(Tz::America__Chicago));
        assert_eq!(
            resolve_tzid("/mozilla.org/Europe/Berlin"),
            Some(Tz::Europe__Berlin)
        );
        assert_eq!(resolve_tzid("Eastern Standard Time"), None);
    }

    #[test]
    fn test_day_bounds() {
        let start = start_of_day(date(2025, 9, 1)).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-09-01T00:00:00-04:00");

        let end = end_of_day(date(2025, 12, 31)).unwrap();
        assert_eq!(
            end.to_rfc3339_opts(chrono::SecondsFormat::Millis, false),
            "2025-12-31T23:59:59.999-05:00"
        );
    }

    #[test]
    fn test_utc_late_evening_is_previous_display_day() {
        // 03:30 UTC on Sept 2 is 23:30 EDT on Sept 1.
        let dt = IcalDateTime::utc(2025, 9, 2, 3, 30, 0);
        assert_eq!(to_display_date(&dt).unwrap(), date(2025, 9, 1));
    }

    #[test]
    fn test_zoned_value_converted() {
        // 08:00 in Tokyo on Sept 2 is 19:00 EDT on Sept 1.
        let dt = IcalDateTime::zoned(2025, 9, 2, 8, 0, 0, "Asia/Tokyo");
        assert_eq!(to_display_date(&dt).unwrap(), date(2025, 9, 1));
    }

    #[test]
    fn test_unknown_tzid_and_floating_read_as_wall_clock() {
        let zoned = IcalDateTime::zoned(2025, 9, 2, 8, 0, 0, "Tokyo Standard Time");
        assert_eq!(to_display_date(&zoned).unwrap(), date(2025, 9, 2));

        let floating = IcalDateTime::floating(2025, 9, 2, 0, 0, 0);
        assert_eq!(to_display_date(&floating).unwrap(), date(2025, 9, 2));
    }

    #[test]
    fn test_dst_gap_shifts_forward() {
        // 02:30 on 2025-03-09 does not exist in New York.
        let gap = date(2025, 3, 9).and_hms_opt(2, 30, 0).unwrap();
        let dt = localize(&DISPLAY_TZ, gap).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-03-09T03:30:00-04:00");
    }
}
