//! Whole-document tests against feeds shaped like real calendar exports.

use chrono::NaiveDate;

use super::core::{DayValue, names};
use super::expand::{build_rrule_set, end_of_day, occurrence_days, start_of_day};
use super::parse::{ParseErrorKind, parse};

const SCHOOL_FEED: &str = "BEGIN:VCALENDAR\r
PRODID:-//Google Inc//Google Calendar 70.9054//EN\r
VERSION:2.0\r
CALSCALE:GREGORIAN\r
X-WR-CALNAME:District Calendar\r
BEGIN:VTIMEZONE\r
TZID:America/New_York\r
BEGIN:DAYLIGHT\r
TZOFFSETFROM:-0500\r
TZOFFSETTO:-0400\r
DTSTART:19700308T020000\r
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r
END:DAYLIGHT\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
DTSTART;VALUE=DATE:20250901\r
DTEND;VALUE=DATE:20250902\r
DTSTAMP:20250801T120000Z\r
UID:labor-day@district\r
SUMMARY:Labor Day - No School\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART;VALUE=DATE:20251126\r
DTEND;VALUE=DATE:20251129\r
UID:thanksgiving@district\r
SUMMARY:Thanksgiving Break\r
LOCATION:All campuses\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART;TZID=America/New_York:20250910T190000\r
DTEND;TZID=America/New_York:20250910T203000\r
UID:board@district\r
SUMMARY:Board Meeting\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART;VALUE=DATE:20250903\r
RRULE:FREQ=WEEKLY;BYDAY=WE;UNTIL=20251217\r
EXDATE;VALUE=DATE:20251126\r
UID:early-release@district\r
SUMMARY:Early Release\r
DESCRIPTION:Students dismissed at 1:00\\, buses run early.\r
END:VEVENT\r
END:VCALENDAR\r
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test_log::test]
fn school_feed_structure() {
    let ical = parse(SCHOOL_FEED).unwrap();
    assert_eq!(ical.version(), Some("2.0"));

    let events = ical.events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[1].location(), Some("All campuses"));
    assert_eq!(
        events[3]
            .get_property("DESCRIPTION")
            .and_then(|p| p.as_text()),
        Some("Students dismissed at 1:00, buses run early.")
    );
}

#[test]
fn school_feed_all_day_flags() {
    let ical = parse(SCHOOL_FEED).unwrap();
    let flags: Vec<bool> = ical
        .events()
        .iter()
        .map(|e| {
            let prop = e.get_property(names::DTSTART).unwrap();
            DayValue::from_property(prop).unwrap().is_all_day()
        })
        .collect();
    assert_eq!(flags, vec![true, true, false, true]);
}

#[test]
fn school_feed_recurring_event_days() {
    let ical = parse(SCHOOL_FEED).unwrap();
    let event = ical.events()[3];

    let start = DayValue::from_property(event.get_property(names::DTSTART).unwrap())
        .unwrap()
        .date()
        .unwrap();
    let rule = event.get_property(names::RRULE).unwrap().as_recur().unwrap();
    let set = build_rrule_set(rule, start, &[], &[date(2025, 11, 26)]).unwrap();

    let window_start = start_of_day(date(2025, 11, 1)).unwrap();
    let window_end = end_of_day(date(2025, 12, 31)).unwrap();
    let days: Vec<_> = occurrence_days(&set, window_start, window_end).collect();

    assert_eq!(
        days,
        vec![
            date(2025, 11, 5),
            date(2025, 11, 12),
            date(2025, 11, 19),
            date(2025, 12, 3),
            date(2025, 12, 10),
            date(2025, 12, 17),
        ]
    );
}

#[test]
fn lf_only_feed_with_folded_summary() {
    let input = "BEGIN:VCALENDAR\nVERSION:2.0\nBEGIN:VEVENT\nUID:x\nSUMMARY:Back-to-School \n Night\nDTSTART;VALUE=DATE:20251020\nEND:VEVENT\nEND:VCALENDAR\n";
    let ical = parse(input).unwrap();
    assert_eq!(ical.events()[0].summary(), Some("Back-to-School Night"));
}

#[test]
fn truncated_feed_is_rejected() {
    let truncated = &SCHOOL_FEED[..SCHOOL_FEED.find("END:VCALENDAR").unwrap()];
    let err = parse(truncated).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingEnd);
}

#[test]
fn html_error_page_is_rejected() {
    let err = parse("<!DOCTYPE html>\n<html><body>Not Found</body></html>\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingPropertyName);
    assert_eq!(err.line, 1);
}
