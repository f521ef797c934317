//! Value type parsers for iCalendar (RFC 5545 §3.3).

use std::str::FromStr;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, RRule, RRuleUntil, Weekday, WeekdayNum,
};

/// Parses an all-digit field, rejecting signs and whitespace that
/// `FromStr` would otherwise accept.
fn digits<T: FromStr>(s: &str, kind: ParseErrorKind, line: usize, col: usize) -> ParseResult<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(kind, line, col).with_context(format!("'{s}' is not numeric")));
    }
    s.parse().map_err(|_err| {
        ParseError::new(kind, line, col).with_context(format!("'{s}' out of range"))
    })
}

/// ## Summary
/// Parses a DATE value (RFC 5545 §3.3.4), e.g. `20250901`.
///
/// ## Errors
/// Returns `InvalidDate` if the value is not eight digits or names a day that
/// does not exist (`20250230`).
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    let kind = ParseErrorKind::InvalidDate;
    if s.len() != 8 || !s.is_ascii() {
        return Err(ParseError::new(kind, line, col)
            .with_context(format!("expected YYYYMMDD, got '{s}'")));
    }

    let date = Date::new(
        digits(&s[0..4], kind, line, col)?,
        digits(&s[4..6], kind, line, col)?,
        digits(&s[6..8], kind, line, col)?,
    );
    if date.to_naive().is_none() {
        return Err(ParseError::new(kind, line, col).with_context(format!("{s} does not exist")));
    }
    Ok(date)
}

/// ## Summary
/// Parses a DATE-TIME value (RFC 5545 §3.3.5), e.g. `20250901T083000Z`.
///
/// A trailing `Z` makes the value UTC; otherwise `tzid` (from the property's
/// TZID parameter) makes it zoned, and its absence makes it floating.
///
/// ## Errors
/// Returns `InvalidDateTime` for a malformed or out-of-range time, and
/// `InvalidDate` for a bad date part.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let kind = ParseErrorKind::InvalidDateTime;
    let Some((date_str, time_str)) = s.split_once('T') else {
        return Err(ParseError::new(kind, line, col).with_context(format!("no 'T' in '{s}'")));
    };

    let date = parse_date(date_str, line, col)?;

    let (time_str, is_utc) = match time_str.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (time_str, false),
    };
    if time_str.len() != 6 || !time_str.is_ascii() {
        return Err(ParseError::new(kind, line, col)
            .with_context(format!("expected HHMMSS, got '{time_str}'")));
    }
    let hour: u8 = digits(&time_str[0..2], kind, line, col)?;
    let minute: u8 = digits(&time_str[2..4], kind, line, col)?;
    let second: u8 = digits(&time_str[4..6], kind, line, col)?;
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(kind, line, col)
            .with_context(format!("{time_str} is not a time of day")));
    }

    let form = match (is_utc, tzid) {
        (true, _) => DateTimeForm::Utc,
        (false, Some(tz)) => DateTimeForm::Zoned {
            tzid: tz.to_string(),
        },
        (false, None) => DateTimeForm::Floating,
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour,
        minute,
        second,
        form,
    })
}

/// ## Summary
/// Parses a DURATION value (RFC 5545 §3.3.6), e.g. `P3D`, `-PT15M`, `P1W`.
///
/// ## Errors
/// Returns `InvalidDuration` if the designators are missing, repeated, out of
/// order, or mix weeks with other units.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let invalid = || {
        ParseError::new(ParseErrorKind::InvalidDuration, line, col).with_context(format!("'{s}'"))
    };

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let body = rest.strip_prefix('P').ok_or_else(invalid)?;

    if let Some(weeks) = body.strip_suffix('W') {
        let weeks = digits(weeks, ParseErrorKind::InvalidDuration, line, col)?;
        let dur = Duration::weeks(weeks);
        return Ok(if negative { dur.negate() } else { dur });
    }

    let (date_part, time_part) = match body.split_once('T') {
        Some((d, t)) if !t.is_empty() => (d, Some(t)),
        Some(_) => return Err(invalid()),
        None => (body, None),
    };

    let mut dur = Duration::default();
    if !date_part.is_empty() {
        let days = date_part.strip_suffix('D').ok_or_else(invalid)?;
        dur.days = digits(days, ParseErrorKind::InvalidDuration, line, col)?;
    } else if time_part.is_none() {
        return Err(invalid());
    }

    if let Some(mut time) = time_part {
        // Units must appear in H, M, S order, each at most once.
        let slots = [
            ('H', &mut dur.hours),
            ('M', &mut dur.minutes),
            ('S', &mut dur.seconds),
        ];
        for (designator, slot) in slots {
            if let Some(idx) = time.find(designator) {
                *slot = digits(&time[..idx], ParseErrorKind::InvalidDuration, line, col)?;
                time = &time[idx + 1..];
            }
        }
        if !time.is_empty() {
            return Err(invalid());
        }
    }

    dur.negative = negative;
    Ok(dur)
}

/// ## Summary
/// Parses a RECUR value (RFC 5545 §3.3.10), e.g. `FREQ=WEEKLY;BYDAY=MO`.
///
/// Unknown rule parts are ignored.
///
/// ## Errors
/// Returns `InvalidRRule` if FREQ is missing or any part is malformed, and
/// `UntilCountConflict` if both UNTIL and COUNT appear.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<RRule> {
    let mut rrule = RRule::default();

    for part in s.split(';').filter(|p| !p.is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, col)
                .with_context(format!("'{part}' is not KEY=VALUE")));
        };
        parse_rrule_part(&mut rrule, key, value, line, col)?;
    }

    if rrule.freq.is_none() {
        return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, col)
            .with_context("FREQ is required"));
    }
    if rrule.until.is_some() && rrule.count.is_some() {
        return Err(ParseError::new(ParseErrorKind::UntilCountConflict, line, col));
    }

    Ok(rrule)
}

fn parse_rrule_part(
    rrule: &mut RRule,
    key: &str,
    value: &str,
    line: usize,
    col: usize,
) -> ParseResult<()> {
    let invalid = || {
        ParseError::new(ParseErrorKind::InvalidRRule, line, col).with_context(format!("{key}={value}"))
    };
    let number = |v: &str| digits(v, ParseErrorKind::InvalidRRule, line, col);

    match key.to_ascii_uppercase().as_str() {
        "FREQ" => rrule.freq = Some(Frequency::parse(value).ok_or_else(invalid)?),
        "INTERVAL" => {
            let interval: u32 = number(value)?;
            if interval == 0 {
                return Err(invalid());
            }
            rrule.interval = Some(interval);
        }
        "COUNT" => rrule.count = Some(number(value)?),
        "UNTIL" => {
            rrule.until = Some(if value.contains('T') {
                RRuleUntil::DateTime(parse_datetime(value, None, line, col)?)
            } else {
                RRuleUntil::Date(parse_date(value, line, col)?)
            });
        }
        "WKST" => rrule.wkst = Some(Weekday::parse(value).ok_or_else(invalid)?),
        "BYSECOND" => rrule.by_second = parse_list(value).ok_or_else(invalid)?,
        "BYMINUTE" => rrule.by_minute = parse_list(value).ok_or_else(invalid)?,
        "BYHOUR" => rrule.by_hour = parse_list(value).ok_or_else(invalid)?,
        "BYDAY" => {
            rrule.by_day = value
                .split(',')
                .map(parse_weekday_num)
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
        }
        "BYMONTHDAY" => rrule.by_monthday = parse_list(value).ok_or_else(invalid)?,
        "BYYEARDAY" => rrule.by_yearday = parse_list(value).ok_or_else(invalid)?,
        "BYWEEKNO" => rrule.by_weekno = parse_list(value).ok_or_else(invalid)?,
        "BYMONTH" => rrule.by_month = parse_list(value).ok_or_else(invalid)?,
        "BYSETPOS" => rrule.by_setpos = parse_list(value).ok_or_else(invalid)?,
        _ => tracing::trace!(key, "Ignoring unknown RRULE part"),
    }
    Ok(())
}

/// Parses a comma-separated list of signed or unsigned integers.
fn parse_list<T: FromStr>(s: &str) -> Option<Vec<T>> {
    s.split(',').map(|v| v.trim().parse().ok()).collect()
}

/// Parses a BYDAY entry such as `MO`, `2TU` or `-1FR`.
fn parse_weekday_num(s: &str) -> Option<WeekdayNum> {
    let s = s.trim();
    let split = s.len().checked_sub(2)?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (ordinal, day) = s.split_at(split);
    let weekday = Weekday::parse(day)?;
    if ordinal.is_empty() {
        Some(WeekdayNum::every(weekday))
    } else {
        WeekdayNum::nth(ordinal.parse().ok()?, weekday)
    }
}

/// ## Summary
/// Unescapes a TEXT value (RFC 5545 §3.3.11).
///
/// Handles `\\`, `\,`, `\;`, `\n` and `\N`. Any other backslash sequence is
/// kept as written.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(escaped @ (',' | ';' | '\\')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_valid_and_invalid() {
        assert_eq!(
            parse_date("20240229", 1, 1).unwrap(),
            Date::new(2024, 2, 29)
        );

        for bad in ["20250229", "20251301", "2025091", "2025-9-1", "+0250901"] {
            let err = parse_date(bad, 3, 9).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::InvalidDate, "{bad}");
            assert_eq!((err.line, err.column), (3, 9));
        }
    }

    #[test]
    fn parse_datetime_forms() {
        let dt = parse_datetime("20250901T083000Z", None, 1, 1).unwrap();
        assert!(dt.is_utc());
        assert_eq!((dt.hour, dt.minute), (8, 30));

        let dt = parse_datetime("20250901T083000", Some("America/Chicago"), 1, 1).unwrap();
        assert_eq!(dt.tzid(), Some("America/Chicago"));

        let dt = parse_datetime("20250901T083000", None, 1, 1).unwrap();
        assert_eq!(dt.form, DateTimeForm::Floating);
    }

    #[test]
    fn parse_datetime_invalid() {
        for bad in ["20250901", "20250901T2500", "20250901T250000", "20250901T12000Z"] {
            let err = parse_datetime(bad, None, 1, 1).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::InvalidDateTime, "{bad}");
        }
        let err = parse_datetime("20250931T120000", None, 1, 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDate);
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("P3D", 1, 1).unwrap(), Duration::days(3));
        assert_eq!(parse_duration("P2W", 1, 1).unwrap(), Duration::weeks(2));
        assert_eq!(
            parse_duration("-P1D", 1, 1).unwrap(),
            Duration::days(1).negate()
        );

        let d = parse_duration("P1DT12H30M", 1, 1).unwrap();
        assert_eq!((d.days, d.hours, d.minutes, d.seconds), (1, 12, 30, 0));

        let d = parse_duration("+PT45S", 1, 1).unwrap();
        assert_eq!(d.as_seconds(), 45);
    }

    #[test]
    fn parse_duration_invalid() {
        for bad in ["3D", "P", "PT", "P1H", "PT1D", "PT1M1H", "P1DT", "P1W2D", "PxD"] {
            let err = parse_duration(bad, 1, 1).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::InvalidDuration, "{bad}");
        }
    }

    #[test]
    fn parse_rrule_parts() {
        let raw = "FREQ=MONTHLY;INTERVAL=2;BYDAY=-1FR,2MO;UNTIL=20251231";
        let rrule = parse_rrule(raw, 1, 1).unwrap();
        assert_eq!(rrule.freq, Some(Frequency::Monthly));
        assert_eq!(rrule.interval, Some(2));
        assert_eq!(rrule.by_day.len(), 2);
        assert_eq!(rrule.by_day[0].ordinal, Some(-1));
        assert_eq!(rrule.until, Some(RRuleUntil::Date(Date::new(2025, 12, 31))));
    }

    #[test]
    fn parse_rrule_ignores_unknown_parts_and_trailing_separator() {
        let rrule = parse_rrule("FREQ=YEARLY;X-NAME=1;", 1, 1).unwrap();
        assert_eq!(rrule.to_string(), "FREQ=YEARLY");
    }

    #[test]
    fn parse_rrule_invalid() {
        let cases = [
            ("BYDAY=MO", ParseErrorKind::InvalidRRule),
            ("FREQ=FORTNIGHTLY", ParseErrorKind::InvalidRRule),
            ("FREQ=WEEKLY;INTERVAL=0", ParseErrorKind::InvalidRRule),
            ("FREQ=WEEKLY;BYDAY=XX", ParseErrorKind::InvalidRRule),
            ("FREQ=WEEKLY;BYDAY=0MO", ParseErrorKind::InvalidRRule),
            ("FREQ=WEEKLY;COUNT", ParseErrorKind::InvalidRRule),
            ("FREQ=DAILY;COUNT=3;UNTIL=20251231", ParseErrorKind::UntilCountConflict),
            ("FREQ=DAILY;UNTIL=20251232", ParseErrorKind::InvalidDate),
        ];
        for (raw, kind) in cases {
            let err = parse_rrule(raw, 1, 1).unwrap_err();
            assert_eq!(err.kind, kind, "{raw}");
        }
    }

    #[test]
    fn unescape_text_sequences() {
        assert_eq!(
            unescape_text(r"Room 4\, Main Hall\; bring lunch\nThanks \\o/ \x"),
            "Room 4, Main Hall; bring lunch\nThanks \\o/ \\x"
        );
    }
}
