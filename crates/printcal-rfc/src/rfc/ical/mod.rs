//! iCalendar RFC 5545 support.
//!
//! - `core`: Type definitions for iCalendar structures
//! - `parse`: Parsers for iCalendar content
//! - `expand`: Recurrence iteration and display-timezone day boundaries
//!
//! ## Example
//!
//! ```rust
//! use printcal_rfc::rfc::ical::parse;
//!
//! let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:a\r\n\
//!              DTSTART;VALUE=DATE:20250901\r\nSUMMARY:Labor Day\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let ical = parse(input).unwrap();
//! assert_eq!(ical.events().len(), 1);
//! ```

pub mod core;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

pub use core::{Component, ComponentKind, DayValue, ICalendar, Parameter, Property};
pub use parse::{ParseError, ParseResult, parse};
