//! Error types for the fetcher module

use crate::error::Error as CrateError;
use crate::splitter::SplitError;
use thiserror::Error;

/// Error type for fetch operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP status {status} for url ({url})")]
    Status {
        /// HTTP status code
        status: u16,
        /// The requested URL
        url: String,
    },

    /// The response is not a textual document
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),

    /// HTML parsing error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Splitting the extracted text failed
    #[error(transparent)]
    Split(#[from] SplitError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => CrateError::Http(e),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}
