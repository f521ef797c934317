//! iCalendar parsing error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for iCalendar parsing.
///
/// Line numbers refer to the physical line a content line started on, so an
/// error in a folded value points at its first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Column number where the error occurred (1-based).
    pub column: usize,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.kind, self.line, self.column)?;
        if let Some(ctx) = &self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input holds no content lines.
    UnexpectedEof,
    /// Content line starts with a separator.
    MissingPropertyName,
    /// Character not allowed in a property name.
    InvalidPropertyName,
    /// Content line has no `:` before the value.
    MissingColon,
    /// Malformed `;NAME=VALUE` parameter.
    InvalidParameter,
    /// Quoted parameter value never closed.
    UnclosedQuote,
    /// Invalid DATE value.
    InvalidDate,
    /// Invalid DATE-TIME value.
    InvalidDateTime,
    /// Invalid DURATION value.
    InvalidDuration,
    /// Invalid RECUR value.
    InvalidRRule,
    /// UNTIL and COUNT in the same rule.
    UntilCountConflict,
    /// Document does not open with `BEGIN:VCALENDAR`.
    MissingBegin,
    /// Component never closed.
    MissingEnd,
    /// END name differs from the open component.
    MismatchedComponent,
    /// Content after the closing `END:VCALENDAR`.
    TrailingContent,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnexpectedEof => "unexpected end of input",
            Self::MissingPropertyName => "missing property name",
            Self::InvalidPropertyName => "invalid property name",
            Self::MissingColon => "missing colon separator",
            Self::InvalidParameter => "invalid parameter format",
            Self::UnclosedQuote => "unclosed quoted string",
            Self::InvalidDate => "invalid date format",
            Self::InvalidDateTime => "invalid date-time format",
            Self::InvalidDuration => "invalid duration format",
            Self::InvalidRRule => "invalid recurrence rule",
            Self::UntilCountConflict => "UNTIL and COUNT are mutually exclusive",
            Self::MissingBegin => "missing BEGIN:VCALENDAR",
            Self::MissingEnd => "missing END line",
            Self::MismatchedComponent => "mismatched BEGIN/END",
            Self::TrailingContent => "content after END:VCALENDAR",
        })
    }
}
