//! # Fetcher Configuration Module
//!
//! Options for retrieving a single page and cutting its text into segments.
//! Uses the same builder pattern as the rest of the crate.

use std::time::Duration;

use crate::splitter::ChunkOptions;

/// Configuration for the content fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User agent to use for requests
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Options for splitting the page text
    pub chunk_options: ChunkOptions,

    /// Maximum number of segments kept from the start of the page
    pub max_segments: usize,

    /// HTML elements whose text is never extracted
    pub skipped_elements: Vec<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("webinsight/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            chunk_options: ChunkOptions::default(),
            max_segments: 5,
            skipped_elements: vec![
                "script".to_string(),
                "style".to_string(),
                "noscript".to_string(),
                "template".to_string(),
            ],
        }
    }
}

/// Builder for FetcherConfig
#[derive(Debug, Default)]
pub struct FetcherConfigBuilder {
    config: FetcherConfig,
}

impl FetcherConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: FetcherConfig::default(),
        }
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the chunk options
    pub fn chunk_options(mut self, chunk_options: ChunkOptions) -> Self {
        self.config.chunk_options = chunk_options;
        self
    }

    /// Set the maximum number of segments to keep
    pub fn max_segments(mut self, max_segments: usize) -> Self {
        self.config.max_segments = max_segments;
        self
    }

    /// Set the HTML elements whose text is skipped
    pub fn skipped_elements(mut self, skipped_elements: Vec<String>) -> Self {
        self.config.skipped_elements = skipped_elements;
        self
    }

    /// Build the configuration
    pub fn build(self) -> FetcherConfig {
        self.config
    }
}

impl FetcherConfig {
    /// Create a new builder
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::new()
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
