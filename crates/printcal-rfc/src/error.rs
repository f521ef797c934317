use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// RFC parsing and recurrence errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Recurrence rule error: {0}")]
    RRuleError(#[from] rrule::RRuleError),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
