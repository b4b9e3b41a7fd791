//! Error types for the webinsight crate

use thiserror::Error;

/// Result type for webinsight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for webinsight operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error, e.g. binding the web server
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Page retrieval or extraction error
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Text splitting error
    #[error("Split error: {0}")]
    Split(String),

    /// Summary generation error
    #[error("Summary error: {0}")]
    Summary(String),

    /// Reasoning loop error
    #[error("Agent error: {0}")]
    Agent(String),

    /// Search tool error
    #[error("Search error: {0}")]
    Search(String),
}
