//! Tests for iCalendar parse errors.

use super::error::{ParseError, ParseErrorKind};

#[test]
fn test_parse_error_with_context() {
    let error =
        ParseError::new(ParseErrorKind::InvalidDate, 3, 9).with_context("20250230 does not exist");

    assert_eq!(error.kind, ParseErrorKind::InvalidDate);
    assert_eq!(error.line, 3);
    assert_eq!(error.column, 9);
    assert_eq!(error.context.as_deref(), Some("20250230 does not exist"));
}

#[test]
fn test_parse_error_display() {
    let error = ParseError::new(ParseErrorKind::MissingColon, 7, 12);
    assert_eq!(
        error.to_string(),
        "missing colon separator at line 7, column 12"
    );
}

#[test]
fn test_parse_error_display_with_context() {
    let error = ParseError::new(ParseErrorKind::MismatchedComponent, 12, 1)
        .with_context("expected END:VEVENT, got END:VTODO");
    assert_eq!(
        error.to_string(),
        "mismatched BEGIN/END at line 12, column 1: expected END:VEVENT, got END:VTODO"
    );
}

#[test]
fn test_error_kind_display() {
    let kinds = [
        (ParseErrorKind::UnexpectedEof, "unexpected end of input"),
        (ParseErrorKind::UnclosedQuote, "unclosed quoted string"),
        (ParseErrorKind::InvalidDuration, "invalid duration format"),
        (ParseErrorKind::InvalidRRule, "invalid recurrence rule"),
        (
            ParseErrorKind::UntilCountConflict,
            "UNTIL and COUNT are mutually exclusive",
        ),
        (ParseErrorKind::MissingBegin, "missing BEGIN:VCALENDAR"),
        (ParseErrorKind::TrailingContent, "content after END:VCALENDAR"),
    ];

    for (kind, expected) in kinds {
        assert_eq!(kind.to_string(), expected);
    }
}

#[test]
fn test_parse_error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&ParseError::new(ParseErrorKind::MissingEnd, 1, 1));
}
