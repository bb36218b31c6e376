//! Error types for confcal.

use thiserror::Error;

/// Errors that abort an export run.
#[derive(Error, Debug)]
pub enum ConfcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch schedule from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for confcal operations.
pub type ConfcalResult<T> = Result<T, ConfcalError>;

/// Why a fetch of a page failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(err.to_string()),
        }
    }
}

/// Why a unit of the schedule page (day section, time block, session entry)
/// produced no events.
///
/// Only some reasons are worth telling the operator about; see [`SkipReason::is_warning`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("day heading has no link")]
    NoAnchor,

    #[error("day heading link has no text")]
    EmptyAnchor,

    #[error("'{0}' is a navigation link, not a day heading")]
    NavigationLink(String),

    #[error("'{0}' does not look like '<label> / <day>'")]
    HeadingFormat(String),

    #[error("Failed to parse date '{text}'")]
    UnparsableDate { text: String },

    #[error("Could not find day container for {heading}")]
    MissingDayContainer { heading: String },

    #[error("time block has no heading")]
    NoTimeHeading,

    #[error("Expected 2 timestamps in time block heading, found {found}")]
    TimestampCount { found: usize },

    #[error("time element has no datetime attribute")]
    MissingTimestamp,

    #[error("Failed to parse datetime '{value}'")]
    UnparsableTimestamp { value: String },
}

impl SkipReason {
    /// Whether this skip points at a broken assumption about the page
    /// structure (logged as a warning) rather than an expected absence.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SkipReason::UnparsableDate { .. }
                | SkipReason::MissingDayContainer { .. }
                | SkipReason::TimestampCount { .. }
                | SkipReason::UnparsableTimestamp { .. }
        )
    }
}
