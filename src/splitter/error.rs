//! Error types for the splitter module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for splitter operations
#[derive(Debug, Error)]
pub enum SplitError {
    /// The chunk options cannot produce segments
    #[error("Invalid chunk options: {0}")]
    InvalidOptions(String),
}

impl From<SplitError> for CrateError {
    fn from(err: SplitError) -> Self {
        CrateError::Split(err.to_string())
    }
}
