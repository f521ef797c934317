//! Recurrence iteration and display-timezone day handling.

mod rrule;
mod timezone;

pub use rrule::{build_rrule_set, occurrence_days};
pub use timezone::{
    end_of_day, localize, resolve_tzid, start_of_day, to_display_date, to_display_instant,
};
