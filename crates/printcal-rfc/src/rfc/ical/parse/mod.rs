//! iCalendar parsing (RFC 5545).
//!
//! - Lexer: line unfolding and content line tokenization
//! - Values: DATE, DATE-TIME, DURATION, RECUR and TEXT parsing
//! - Parser: component tree construction

mod error;
mod lexer;
mod parser;
mod values;

#[cfg(test)]
mod error_tests;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines};
pub use parser::parse;
pub use values::{parse_date, parse_datetime, parse_duration, parse_rrule, unescape_text};
