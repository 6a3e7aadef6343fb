//! Error types for lunchcal.

use thiserror::Error;

/// Errors that can occur while fetching menus and building calendars.
#[derive(Error, Debug)]
pub enum LunchCalError {
    #[error("Could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid menu date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Menu day has no date")]
    MissingDate,

    #[error("{days} days after {start} is past the last supported date")]
    DateOutOfRange { start: chrono::NaiveDate, days: u32 },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl LunchCalError {
    /// True for failures talking to the menu API (transport, non-2xx, bad payload).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            LunchCalError::Request { .. } | LunchCalError::Status { .. } | LunchCalError::Decode { .. }
        )
    }
}

/// Result type alias for lunchcal operations.
pub type LunchCalResult<T> = Result<T, LunchCalError>;
