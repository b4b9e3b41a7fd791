//! # Mock Completion Model for Testing
//!
//! Provides a `MockCompletionModel` that implements the `CompletionModel` trait
//! for use in tests. Replies are scripted up front and handed out in order,
//! which lets a test drive a multi-step reasoning loop deterministically.

use rig::{
    completion::{
        AssistantContent, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
    },
    one_or_many::OneOrMany,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// One scripted reply of the mock model
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A plain text answer
    Text(String),
    /// A native tool call
    ToolCall { name: String, arguments: serde_json::Value },
    /// A provider failure
    Error(String),
}

/// A mock completion model for testing purposes.
/// Each call to `completion` consumes the next scripted reply; once the script
/// is exhausted it answers with an empty text.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionModel {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<AtomicUsize>,
}

impl MockCompletionModel {
    /// Creates a new mock model with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock model that plays back the given replies in order.
    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Helper to create a mock that answers once with text.
    pub fn with_text(text: &str) -> Self {
        Self::with_replies([MockReply::Text(text.to_string())])
    }

    /// Number of completion requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionModel for MockCompletionModel {
    type Response = String;

    async fn completion(
        &self,
        _completion_request: CompletionRequest,
    ) -> Result<CompletionResponse<Self::Response>, CompletionError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().await.pop_front();

        let choice = match reply {
            Some(MockReply::Text(text)) => AssistantContent::text(text),
            Some(MockReply::ToolCall { name, arguments }) => {
                AssistantContent::tool_call(format!("call-{call}"), name, arguments)
            }
            Some(MockReply::Error(message)) => {
                return Err(CompletionError::ProviderError(message));
            }
            None => AssistantContent::text(""),
        };

        Ok(CompletionResponse {
            choice: OneOrMany::one(choice),
            raw_response: String::new(),
        })
    }
}
