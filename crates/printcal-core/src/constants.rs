//! Constants shared across crates.

use chrono_tz::Tz;

/// IANA identifier of the zone used for every calendar-day boundary.
pub const DISPLAY_TIMEZONE: &str = "America/New_York";

/// Parsed form of [`DISPLAY_TIMEZONE`].
pub const DISPLAY_TZ: Tz = chrono_tz::America::New_York;

/// Route component constants
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const CALENDAR_ROUTE_COMPONENT: &str = "calendar";
pub const CALENDAR_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", CALENDAR_ROUTE_COMPONENT);
