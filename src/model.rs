//! # LLM Client Module
//!
//! This module provides the long-lived handle on the hosted chat-completion
//! model. It is built once at start-up and shared read-only by the summarizer
//! and the insight agent.
//!
//! ## Key Components
//!
//! - `ModelConfig`: model identifier, endpoint and sampling temperature
//! - `Client`: wraps a rig `CompletionModel` together with its temperature
//! - `response_text`: collects the textual parts of a model response
//!
//! The default provider is OpenRouter, reached through rig's OpenAI-compatible
//! client.

use rig::{
    agent::AgentBuilder,
    completion::{AssistantContent, CompletionModel},
    one_or_many::OneOrMany,
    providers::openai,
};
use tracing::{debug, warn};

#[cfg(test)]
pub mod mock_model;

/// Environment variable holding the model API key
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Environment variable overriding the model endpoint
pub const BASE_URL_ENV: &str = "OPENROUTER_BASE_URL";

/// Default OpenAI-compatible endpoint
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "mistralai/mixtral-8x7b-instruct";

/// Configuration for the hosted model
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model identifier understood by the provider
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Sampling temperature for every request
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENROUTER_BASE_URL.to_string(),
            temperature: 0.3,
        }
    }
}

impl ModelConfig {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Client<C>
where
    C: CompletionModel,
{
    completion_model: C,
    temperature: f64,
}

impl Client<openai::CompletionModel> {
    /// Build an OpenRouter client from the environment.
    ///
    /// A missing API key is only logged: the provider rejects the first
    /// request instead.
    pub fn new_openrouter_from_env(config: &ModelConfig) -> Self {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_else(|_| {
            warn!("{} is not set; model requests will fail", API_KEY_ENV);
            String::new()
        });
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| config.base_url.clone());

        debug!(model = %config.model, %base_url, "Creating model client");
        let openai_client = openai::Client::from_url(&api_key, &base_url);
        Self::new(
            openai_client.completion_model(&config.model),
            config.temperature,
        )
    }
}

impl<C> Client<C>
where
    C: CompletionModel,
{
    pub fn new(completion_model: C, temperature: f64) -> Self {
        Self {
            completion_model,
            temperature,
        }
    }

    pub fn completion(&self) -> &C {
        &self.completion_model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Start an agent on this model with the configured temperature
    pub fn agent(&self) -> AgentBuilder<C> {
        AgentBuilder::new(self.completion_model.clone()).temperature(self.temperature)
    }
}

/// Join the textual parts of a model response; tool calls are skipped.
pub fn response_text(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect::<Vec<String>>()
        .join("\n")
}
