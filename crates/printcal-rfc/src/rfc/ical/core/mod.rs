//! iCalendar core models (RFC 5545).
//!
//! Read-only representations of the content a calendar feed carries. Unknown
//! properties and components are kept in the tree but never interpreted.

mod component;
mod datetime;
mod day;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm};
pub use day::DayValue;
pub use duration::Duration;
pub use parameter::Parameter;
pub use property::{ContentLine, Property, names};
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday, WeekdayNum};
pub use value::{Date, Value};
