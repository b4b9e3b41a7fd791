//! # Content Fetcher Module
//!
//! Retrieves a single web page, extracts its visible text and cuts it into
//! overlapping segments. Only the first few segments are kept, so the amount
//! of text handed to the language model stays bounded regardless of page size.
//!
//! ## Key Components
//!
//! - `FetcherConfig`: user agent, timeout, segment options
//! - `Fetcher`: HTTP client plus configuration, shared read-only across requests
//! - `FetchedPage`: extracted text and metadata of one page
//! - Content extraction utilities for converting HTML to plain text

mod config;
mod content_extraction;
mod error;

pub use config::{FetcherConfig, FetcherConfigBuilder};
pub use content_extraction::{extract_metadata, extract_text, normalize_whitespace};
pub use error::FetchError;

use crate::splitter::split_text;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Prefix of every fetch failure shown to the user
pub const FETCH_ERROR_PREFIX: &str = "Error scraping content:";

/// Represents a fetched page with its text and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL of the page
    pub url: String,

    /// Extracted text of the page
    pub text: String,

    /// Metadata extracted from the page
    pub metadata: PageMetadata,
}

/// Metadata for a fetched page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Title of the page
    pub title: Option<String>,

    /// Description of the page
    pub description: Option<String>,

    /// Domain of the page
    pub domain: String,
}

/// Kind of document a response carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Html,
    PlainText,
}

impl DocumentKind {
    fn from_content_type(content_type: Option<&str>) -> Result<Self, FetchError> {
        let Some(content_type) = content_type else {
            return Ok(Self::Html);
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "" | "text/html" | "application/xhtml+xml" => Ok(Self::Html),
            "text/plain" | "text/markdown" => Ok(Self::PlainText),
            "text/xml" | "application/xml" => Ok(Self::Html),
            other => Err(FetchError::UnsupportedContent(other.to_string())),
        }
    }
}

/// Retrieves pages and turns them into bounded text
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Create a fetcher with the given configuration
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        config.chunk_options.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// The configuration this fetcher was built with
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Retrieve a page and extract its text and metadata
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        info!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let kind = DocumentKind::from_content_type(content_type.as_deref())?;

        let body = response.text().await?;
        debug!(body_len = body.len(), ?kind, "Received response body");

        let page = match kind {
            DocumentKind::Html => {
                let metadata = match extract_metadata(url, &body) {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        warn!("Error extracting metadata: {:?}", e);
                        PageMetadata::default()
                    }
                };
                FetchedPage {
                    url: url.to_string(),
                    text: extract_text(&body, &self.config.skipped_elements)?,
                    metadata,
                }
            }
            DocumentKind::PlainText => FetchedPage {
                url: url.to_string(),
                text: body,
                metadata: PageMetadata::default(),
            },
        };

        info!(
            title = page.metadata.title.as_deref().unwrap_or("Unknown"),
            text_len = page.text.len(),
            "Fetched page"
        );
        Ok(page)
    }

    /// Retrieve a page and return the first segments of its text, joined by
    /// a blank line
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let page = self.fetch_page(url).await?;
        let segments = split_text(&page.text, &self.config.chunk_options)?;

        let total = segments.len();
        let kept: Vec<String> = segments.into_iter().take(self.config.max_segments).collect();
        debug!("Keeping {} of {} segments", kept.len(), total);

        Ok(kept.join("\n\n"))
    }
}

/// Render a fetch failure the way it is shown to the user
pub fn describe_fetch_error(err: &FetchError) -> String {
    format!("{} {}", FETCH_ERROR_PREFIX, err)
}
