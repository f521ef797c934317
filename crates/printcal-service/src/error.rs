use printcal_rfc::error::RfcError;
use printcal_rfc::rfc::ical::ParseError;
use thiserror::Error;

/// Period resolution errors
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    #[error("Period {name} ends before it starts in {year}")]
    InvertedPeriod { name: &'static str, year: i32 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Event expansion errors
#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Calendar parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Cannot expand event {uid:?}: {source}")]
    Recurrence {
        uid: String,
        #[source]
        source: RfcError,
    },
}

impl ExpandError {
    /// Attaches the UID of the event being decoded to an RFC-layer error.
    ///
    /// Parse errors keep their own variant.
    #[must_use]
    pub fn for_event(uid: &str, err: RfcError) -> Self {
        match err {
            RfcError::ParseError(e) => Self::Parse(e),
            source => Self::Recurrence {
                uid: uid.to_string(),
                source,
            },
        }
    }
}

/// Remote calendar fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type RangeResult<T> = std::result::Result<T, RangeError>;
pub type ExpandResult<T> = std::result::Result<T, ExpandError>;
pub type FetchResult<T> = std::result::Result<T, FetchError>;
