use thiserror::Error;

use crate::error::Error as CrateError;

#[derive(Error, Debug)]
pub enum SearchToolError {
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Search API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Search task failed: {0}")]
    Task(String),
}

impl From<SearchToolError> for CrateError {
    fn from(err: SearchToolError) -> Self {
        CrateError::Search(err.to_string())
    }
}
