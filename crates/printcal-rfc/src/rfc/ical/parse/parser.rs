//! iCalendar document parser (RFC 5545).
//!
//! Builds the component tree and types the values of the properties the
//! expander reads. Every other property keeps its raw text.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::{parse_date, parse_datetime, parse_duration, parse_rrule, unescape_text};
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property, Value};

/// ## Summary
/// Parses an iCalendar document from a string.
///
/// The document must open with `BEGIN:VCALENDAR`, and every BEGIN must be
/// closed by a matching END. Nothing may follow the closing
/// `END:VCALENDAR`.
///
/// ## Errors
/// Returns the first lexical, structural or value error, with the line it
/// occurred on.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let lines = split_lines(input);
    tracing::trace!(count = lines.len(), "Split content lines");

    let mut iter = lines.into_iter();
    let Some((first_num, first)) = iter.next() else {
        return Err(ParseError::new(ParseErrorKind::UnexpectedEof, 1, 1)
            .with_context("no content lines"));
    };

    let begin = parse_content_line(&first, first_num)?;
    if begin.name != "BEGIN" || !begin.raw_value.eq_ignore_ascii_case("VCALENDAR") {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, first_num, 1)
            .with_context(format!("found {}:{}", begin.name, begin.raw_value)));
    }

    let root = parse_component(&mut iter, Component::named("VCALENDAR"), first_num)?;

    if let Some((line_num, _)) = iter.next() {
        return Err(ParseError::new(ParseErrorKind::TrailingContent, line_num, 1));
    }

    tracing::debug!(
        children = root.children.len(),
        "Parsed iCalendar document"
    );
    Ok(ICalendar { root })
}

/// Fills `component` with properties and children until its END line.
fn parse_component(
    iter: &mut impl Iterator<Item = (usize, String)>,
    mut component: Component,
    begin_line: usize,
) -> ParseResult<Component> {
    let mut last_line = begin_line;

    while let Some((line_num, raw)) = iter.next() {
        last_line = line_num;
        let cl = parse_content_line(&raw, line_num)?;

        match cl.name.as_str() {
            "BEGIN" => {
                let child = parse_component(iter, Component::named(&cl.raw_value), line_num)?;
                component.add_child(child);
            }
            "END" => {
                let end_name = cl.raw_value.to_ascii_uppercase();
                if end_name != component.name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{}, got END:{end_name}",
                                component.name
                            )),
                    );
                }
                return Ok(component);
            }
            _ => {
                let in_event = component.kind == ComponentKind::Event;
                let value_col = raw.len() - cl.raw_value.len() + 1;
                component.add_property(parse_property(cl, line_num, value_col, in_event)?);
            }
        }
    }

    Err(ParseError::new(ParseErrorKind::MissingEnd, last_line, 1)
        .with_context(format!("missing END:{}", component.name)))
}

/// How a property's value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Date,
    DateTime,
    Duration,
    Recur,
    Text,
    Raw,
}

/// Picks the value kind for a property.
///
/// DTSTART, DTEND and RECURRENCE-ID are dates when `VALUE=DATE` is given or
/// when, without a VALUE parameter, the value is eight characters with no
/// `T`. Date and recurrence properties are only typed inside VEVENT.
fn value_kind(cl: &ContentLine, in_event: bool) -> ValueKind {
    let explicit = cl.value_type().map(str::to_ascii_uppercase);
    let looks_like_date = cl.raw_value.len() == 8 && !cl.raw_value.contains('T');

    match cl.name.as_str() {
        "SUMMARY" | "LOCATION" | "UID" | "DESCRIPTION" => ValueKind::Text,
        "DTSTART" | "DTEND" | "RECURRENCE-ID" | "EXDATE" | "RDATE" if in_event => {
            match explicit.as_deref() {
                Some("DATE") => ValueKind::Date,
                Some("DATE-TIME") => ValueKind::DateTime,
                Some(_) => ValueKind::Raw,
                None if looks_like_date => ValueKind::Date,
                None => ValueKind::DateTime,
            }
        }
        "DURATION" if in_event => ValueKind::Duration,
        "RRULE" if in_event => ValueKind::Recur,
        _ => ValueKind::Raw,
    }
}

/// Parses a property from a content line, resolving the value type.
fn parse_property(
    cl: ContentLine,
    line_num: usize,
    col: usize,
    in_event: bool,
) -> ParseResult<Property> {
    let tzid = cl.tzid();
    let is_list = matches!(cl.name.as_str(), "EXDATE" | "RDATE");
    let raw = cl.raw_value.as_str();

    let value = match value_kind(&cl, in_event) {
        ValueKind::Text => Value::Text(unescape_text(raw)),
        ValueKind::Date if is_list => Value::DateList(
            raw.split(',')
                .map(|s| parse_date(s.trim(), line_num, col))
                .collect::<ParseResult<_>>()?,
        ),
        ValueKind::Date => Value::Date(parse_date(raw, line_num, col)?),
        ValueKind::DateTime if is_list => Value::DateTimeList(
            raw.split(',')
                .map(|s| parse_datetime(s.trim(), tzid, line_num, col))
                .collect::<ParseResult<_>>()?,
        ),
        ValueKind::DateTime => Value::DateTime(parse_datetime(raw, tzid, line_num, col)?),
        ValueKind::Duration => Value::Duration(parse_duration(raw, line_num, col)?),
        ValueKind::Recur => Value::Recur(Box::new(parse_rrule(raw, line_num, col)?)),
        ValueKind::Raw => Value::Unknown(raw.to_string()),
    };

    Ok(Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Date, Frequency};

    fn wrap(body: &str) -> String {
        format!("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n{body}END:VCALENDAR\r\n")
    }

    #[test_log::test]
    fn parse_all_day_and_timed_starts() {
        let input = wrap(
            "BEGIN:VEVENT\r\n\
             UID:a\r\n\
             DTSTART;VALUE=DATE:20250901\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             UID:b\r\n\
             DTSTART:20250902\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             UID:c\r\n\
             DTSTART;TZID=America/New_York:20250903T090000\r\n\
             END:VEVENT\r\n",
        );
        let ical = parse(&input).unwrap();
        let events = ical.events();
        assert_eq!(events.len(), 3);

        let start = |i: usize| events[i].get_property("DTSTART").unwrap();
        assert_eq!(start(0).as_date(), Some(&Date::new(2025, 9, 1)));
        assert_eq!(start(1).as_date(), Some(&Date::new(2025, 9, 2)));
        assert_eq!(start(2).as_datetime().unwrap().tzid(), Some("America/New_York"));
    }

    #[test]
    fn parse_rrule_exdate_and_duration() {
        let input = wrap(
            "BEGIN:VEVENT\r\n\
             DTSTART;VALUE=DATE:20250901\r\n\
             DURATION:P2D\r\n\
             RRULE:FREQ=WEEKLY;COUNT=4\r\n\
             EXDATE;VALUE=DATE:20250908,20250915\r\n\
             END:VEVENT\r\n",
        );
        let ical = parse(&input).unwrap();
        let event = ical.events()[0];

        let rrule = event.get_property("RRULE").unwrap().as_recur().unwrap();
        assert_eq!(rrule.freq, Some(Frequency::Weekly));
        assert_eq!(event.get_property("DURATION").unwrap().as_duration().unwrap().days, 2);
        assert_eq!(
            event.get_property("EXDATE").unwrap().value,
            Value::DateList(vec![Date::new(2025, 9, 8), Date::new(2025, 9, 15)])
        );
    }

    #[test]
    fn parse_keeps_unread_properties_raw() {
        let input = wrap(
            "BEGIN:VTIMEZONE\r\n\
             TZID:Custom\r\n\
             BEGIN:STANDARD\r\n\
             DTSTART:16010101T020000\r\n\
             TZOFFSETFROM:-0400\r\n\
             END:STANDARD\r\n\
             END:VTIMEZONE\r\n\
             BEGIN:VEVENT\r\n\
             DTSTAMP:not-a-timestamp\r\n\
             SUMMARY:Bake sale\\, gym\r\n\
             BEGIN:VALARM\r\n\
             TRIGGER:-PT15M\r\n\
             END:VALARM\r\n\
             END:VEVENT\r\n",
        );
        let ical = parse(&input).unwrap();
        let event = ical.events()[0];
        assert_eq!(event.summary(), Some("Bake sale, gym"));
        assert_eq!(
            event.get_property("DTSTAMP").unwrap().value,
            Value::Unknown("not-a-timestamp".to_string())
        );
        assert_eq!(event.children.len(), 1);
        assert_eq!(ical.root.children[0].children[0].kind, ComponentKind::Standard);
    }

    #[test]
    fn parse_rejects_missing_vcalendar() {
        let err = parse("BEGIN:VEVENT\r\nEND:VEVENT\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingBegin);

        let err = parse("\r\n\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn parse_rejects_unbalanced_components() {
        let err = parse("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:x\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingEnd);
        assert_eq!(err.line, 3);

        let err = parse(&wrap("BEGIN:VEVENT\r\nEND:VTODO\r\n")).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
        assert_eq!(err.line, 4);

        let err = parse("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nBEGIN:VEVENT\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingContent);
    }

    #[test]
    fn parse_rejects_bad_values_with_position() {
        let err = parse(&wrap(
            "BEGIN:VEVENT\r\nDTSTART;VALUE=DATE:20250231\r\nEND:VEVENT\r\n",
        ))
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDate);
        assert_eq!(err.line, 4);

        let err = parse(&wrap("BEGIN:VEVENT\r\nRRULE:COUNT=3\r\nEND:VEVENT\r\n")).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidRRule);

        let err = parse(&wrap("BEGIN:VEVENT\r\nDURATION:3 days\r\nEND:VEVENT\r\n")).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDuration);

        let err = parse(&wrap("BEGIN:VEVENT\r\nthis is not a line\r\nEND:VEVENT\r\n"))
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidPropertyName);
    }
}
