use rig::completion::CompletionError;
use thiserror::Error;

use crate::error::Error as CrateError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Completion(#[from] CompletionError),

    #[error("Agent reached maximum iterations ({0}) without a final answer")]
    MaxIterations(usize),
}

impl From<AgentError> for CrateError {
    fn from(err: AgentError) -> Self {
        CrateError::Agent(err.to_string())
    }
}
