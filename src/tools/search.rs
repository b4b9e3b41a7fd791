use std::time::Duration;

use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use super::error::SearchToolError;

/// Environment variable holding the search API key
pub const API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Environment variable overriding the search endpoint
pub const ENDPOINT_ENV: &str = "TAVILY_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";

/// Per-request timeout of the search API
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

const DESCRIPTION: &str = "Useful for answering questions about current events or web data.";

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// One search hit as returned to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    content: Option<String>,
}

// Tavily Search Tool
#[derive(Debug, Clone)]
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    max_results: usize,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>, max_results: usize) -> Result<Self, SearchToolError> {
        Self::with_timeout(api_key, max_results, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        max_results: usize,
        timeout: Duration,
    ) -> Result<Self, SearchToolError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results,
        })
    }

    /// Build the tool from the environment. A missing key is only logged;
    /// the search API rejects the first call instead.
    pub fn from_env(max_results: usize) -> Result<Self, SearchToolError> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_else(|_| {
            warn!("{} is not set; web search calls will fail", API_KEY_ENV);
            String::new()
        });
        let tool = Self::new(api_key, max_results)?;
        Ok(match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => tool.with_endpoint(endpoint.trim()),
            _ => tool,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

async fn search(
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    query: String,
    max_results: usize,
) -> Result<Vec<SearchHit>, SearchToolError> {
    let body = json!({
        "api_key": api_key,
        "query": query,
        "max_results": max_results,
        "search_depth": "advanced",
        "include_answer": false,
        "include_raw_content": false,
        "include_images": false,
    });

    let response = client
        .post(&endpoint)
        .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", api_key))
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchToolError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: TavilyResponse = response.json().await?;
    Ok(parsed
        .results
        .into_iter()
        .take(max_results)
        .map(|r| SearchHit {
            url: r.url,
            content: r.content.unwrap_or_default(),
        })
        .collect())
}

impl Tool for TavilySearch {
    const NAME: &'static str = "tavily_search_results_json";

    type Error = SearchToolError;
    type Args = SearchParams;
    type Output = Vec<SearchHit>;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: DESCRIPTION.to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        info!(query = %args.query, "Web search");

        // reqwest futures are not Sync; run the request on its own task.
        let handle = tokio::spawn(search(
            self.client.clone(),
            self.endpoint.clone(),
            self.api_key.clone(),
            args.query,
            self.max_results,
        ));
        let hits = handle
            .await
            .map_err(|e| SearchToolError::Task(e.to_string()))??;

        debug!(hits = hits.len(), "Web search completed");
        Ok(hits)
    }
}
