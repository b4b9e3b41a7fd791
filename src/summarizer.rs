//! Key-insight summaries of fetched page content

use crate::error::Error as CrateError;
use crate::model::{Client, response_text};
use rig::{
    agent::Agent,
    completion::{Completion as _, CompletionError, CompletionModel},
};
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

/// Error type for summary generation
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The model request failed
    #[error("{0}")]
    Completion(#[from] CompletionError),
}

impl From<SummaryError> for CrateError {
    fn from(err: SummaryError) -> Self {
        CrateError::Summary(err.to_string())
    }
}

/// Build the summary prompt; the text is embedded verbatim.
pub fn summary_prompt(text: &str) -> String {
    format!(
        "Provide a clear, concise, and informative key insights of the following text:\n\n{}",
        text
    )
}

/// Asks the model for the key insights of a text
pub struct Summarizer<M>
where
    M: CompletionModel,
{
    agent: Agent<M>,
}

impl<M> Summarizer<M>
where
    M: CompletionModel,
{
    pub fn new(client: &Client<M>) -> Self {
        Self {
            agent: client.agent().build(),
        }
    }

    /// Generate a summary for a text
    ///
    /// # Arguments
    ///
    /// * `text` - The text to summarize, already truncated by the caller
    ///
    /// # Returns
    ///
    /// The raw textual response of the model
    #[instrument(name = "summarize", skip_all, fields(text_len = text.len()))]
    pub async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        debug!("Generating summary for text of length {}", text.len());

        let response = self
            .agent
            .completion(summary_prompt(text), Vec::new())
            .await?
            .send()
            .await?;

        let summary = response_text(&response.choice);
        if summary.is_empty() {
            warn!("Model returned an empty summary");
        }

        trace!("Generated summary of length {}", summary.len());
        Ok(summary)
    }
}
