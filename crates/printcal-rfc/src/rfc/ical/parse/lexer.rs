//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Unfolds physical lines and splits each content line into name, parameters
//! and raw value.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// ## Summary
/// Splits input into logical content lines, joining folded continuations.
///
/// Accepts CRLF and bare LF endings. A line starting with SP or HTAB
/// continues the previous one with that single character removed. Blank lines
/// and a leading byte-order mark are skipped. Each entry carries the 1-based
/// number of the physical line it started on.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (idx, raw) in input.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }

        match (line.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(continuation), Some((_, prev))) => prev.push_str(continuation),
            (Some(continuation), None) => lines.push((idx + 1, continuation.to_string())),
            (None, _) => lines.push((idx + 1, line.to_string())),
        }
    }

    lines
}

/// Cursor over one content line. Positions are byte offsets.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
    line_num: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line_num, self.pos + 1)
    }

    /// Consumes a run of name characters (`ALPHA`, `DIGIT`, `-`).
    fn take_name(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            self.pos += 1;
        }
        &self.line[start..self.pos]
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }
}

/// ## Summary
/// Parses a single unfolded content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the name is missing or contains invalid characters, a
/// parameter is malformed, a quoted parameter value is unterminated, or no
/// `:` separates the value.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut cursor = Cursor {
        line,
        pos: 0,
        line_num,
    };

    let name = cursor.take_name();
    if name.is_empty() {
        return Err(cursor.error(ParseErrorKind::MissingPropertyName));
    }

    let mut params = Vec::new();
    loop {
        match cursor.bump() {
            Some(';') => params.push(parse_parameter(&mut cursor)?),
            Some(':') => break,
            Some(c) => {
                cursor.pos -= c.len_utf8();
                return Err(cursor
                    .error(ParseErrorKind::InvalidPropertyName)
                    .with_context(format!("unexpected '{c}' in {name}")));
            }
            None => {
                return Err(cursor
                    .error(ParseErrorKind::MissingColon)
                    .with_context(format!("no value for {name}")));
            }
        }
    }

    Ok(ContentLine::with_params(name, params, cursor.rest()))
}

/// Parses `NAME=value[,value...]`, leaving the cursor on the `;` or `:`
/// that follows.
fn parse_parameter(cursor: &mut Cursor<'_>) -> ParseResult<Parameter> {
    let name = cursor.take_name();
    if name.is_empty() || cursor.bump() != Some('=') {
        return Err(cursor.error(ParseErrorKind::InvalidParameter));
    }

    let mut values = vec![parse_param_value(cursor)?];
    while cursor.peek() == Some(',') {
        cursor.bump();
        values.push(parse_param_value(cursor)?);
    }

    match cursor.peek() {
        Some(';' | ':') => Ok(Parameter::with_values(name, values)),
        Some(c) => Err(cursor
            .error(ParseErrorKind::InvalidParameter)
            .with_context(format!("unexpected '{c}' after {name} value"))),
        None => Err(cursor.error(ParseErrorKind::MissingColon)),
    }
}

/// Parses one parameter value, quoted or bare.
///
/// Quoted values may contain `,;:` and use RFC 6868 caret escapes.
fn parse_param_value(cursor: &mut Cursor<'_>) -> ParseResult<String> {
    if cursor.peek() != Some('"') {
        let start = cursor.pos;
        while cursor.peek().is_some_and(|c| !matches!(c, ',' | ';' | ':' | '"')) {
            cursor.bump();
        }
        return Ok(cursor.line[start..cursor.pos].to_string());
    }

    let open = cursor.error(ParseErrorKind::UnclosedQuote);
    cursor.bump();
    let mut value = String::new();
    loop {
        match cursor.bump() {
            Some('"') => return Ok(value),
            Some('^') => match cursor.peek() {
                Some('^') => {
                    cursor.bump();
                    value.push('^');
                }
                Some('n') => {
                    cursor.bump();
                    value.push('\n');
                }
                Some('\'') => {
                    cursor.bump();
                    value.push('"');
                }
                _ => value.push('^'),
            },
            Some(c) => value.push(c),
            None => return Err(open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_unfolds_crlf_and_lf() {
        let input = "SUMMARY:Fall\r\n  Festival\nLOCATION:Gym\n\tnasium\r\n";
        let lines = split_lines(input);
        assert_eq!(
            lines,
            vec![
                (1, "SUMMARY:Fall Festival".to_string()),
                (3, "LOCATION:Gymnasium".to_string()),
            ]
        );
    }

    #[test]
    fn split_lines_skips_bom_and_blank_lines() {
        let input = "\u{feff}BEGIN:VCALENDAR\r\n\r\nEND:VCALENDAR";
        let lines = split_lines(input);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], (3, "END:VCALENDAR".to_string()));
    }

    #[test]
    fn parse_simple_line() {
        let cl = parse_content_line("summary:Picture Day", 1).unwrap();
        assert_eq!(cl.name, "SUMMARY");
        assert!(cl.params.is_empty());
        assert_eq!(cl.raw_value, "Picture Day");
    }

    #[test]
    fn parse_value_may_contain_colons() {
        let cl = parse_content_line("URL:https://example.com/cal.ics", 1).unwrap();
        assert_eq!(cl.raw_value, "https://example.com/cal.ics");
    }

    #[test]
    fn parse_line_with_params() {
        let cl = parse_content_line("DTSTART;VALUE=DATE:20250901", 4).unwrap();
        assert_eq!(cl.name, "DTSTART");
        assert_eq!(cl.value_type(), Some("DATE"));
        assert_eq!(cl.raw_value, "20250901");
    }

    #[test]
    fn parse_quoted_and_multi_valued_params() {
        let cl = parse_content_line(
            "ATTENDEE;CN=\"Doe, Jane ^'JD^'\";ROLE=CHAIR,OPT-PARTICIPANT:mailto:jd@example.com",
            1,
        )
        .unwrap();
        assert_eq!(cl.params[0].value(), Some("Doe, Jane \"JD\""));
        assert_eq!(cl.params[1].values, vec!["CHAIR", "OPT-PARTICIPANT"]);
        assert_eq!(cl.raw_value, "mailto:jd@example.com");
    }

    #[test]
    fn parse_line_errors() {
        let cases = [
            ("NOCOLON", ParseErrorKind::MissingColon),
            (":value", ParseErrorKind::MissingPropertyName),
            ("SUM MARY:x", ParseErrorKind::InvalidPropertyName),
            ("DTSTART;VALUE:20250901", ParseErrorKind::InvalidParameter),
            ("ATTENDEE;CN=\"Open:mailto:x", ParseErrorKind::UnclosedQuote),
        ];
        for (line, kind) in cases {
            let err = parse_content_line(line, 2).unwrap_err();
            assert_eq!(err.kind, kind, "{line}");
            assert_eq!(err.line, 2);
        }
    }

    #[test]
    fn parse_line_error_column() {
        let err = parse_content_line("SUM MARY:x", 1).unwrap_err();
        assert_eq!(err.column, 4);
    }
}
