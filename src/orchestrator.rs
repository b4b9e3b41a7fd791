//! # Orchestrator Module
//!
//! Runs one analysis request end to end: validate the URL, fetch and cap the
//! page text, then produce the summary and the agentic analysis side by side.
//! Every outcome, failures included, is a pair of display strings.

use std::future::Future;

use rig::{completion::CompletionModel, providers::openai};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::agent::{AgentConfig, AgentError, InsightAgent};
use crate::fetcher::{FetchError, Fetcher, FetcherConfig, describe_fetch_error};
use crate::model::{Client, ModelConfig};
use crate::summarizer::{SummaryError, Summarizer};
use crate::text::{MAX_CONTENT_CHARS, sanitize, truncate_chars};
use crate::tools::search::TavilySearch;
use crate::validate::is_valid_url;

pub const NO_URL: &str = "No URL provided";
pub const NO_URL_ANALYSIS: &str = "No analysis (missing URL)";
pub const INVALID_URL: &str = "Invalid URL";
pub const INVALID_URL_ANALYSIS: &str = "No analysis (invalid URL)";

/// Number of search results handed to the agent per query
pub const SEARCH_RESULTS: usize = 1;

/// Source of page text
pub trait ContentSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

pub trait Summarize {
    fn summarize(&self, text: &str) -> impl Future<Output = Result<String, SummaryError>> + Send;
}

pub trait Analyze {
    fn analyze(&self, text: &str) -> impl Future<Output = Result<String, AgentError>> + Send;
}

impl ContentSource for Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        Fetcher::fetch(self, url)
    }
}

impl<M> Summarize for Summarizer<M>
where
    M: CompletionModel,
{
    fn summarize(&self, text: &str) -> impl Future<Output = Result<String, SummaryError>> + Send {
        Summarizer::summarize(self, text)
    }
}

impl<M> Analyze for InsightAgent<M>
where
    M: CompletionModel,
{
    fn analyze(&self, text: &str) -> impl Future<Output = Result<String, AgentError>> + Send {
        InsightAgent::analyze(self, text)
    }
}

/// The two outputs of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Shown as "Key Info"
    pub summary: String,
    /// Shown as "Concise Summary"
    pub analysis: String,
}

impl Analysis {
    fn new(summary: impl Into<String>, analysis: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            analysis: analysis.into(),
        }
    }
}

/// Process-wide collaborators, built once and shared read-only
pub struct AppContext<F, S, A> {
    fetcher: F,
    summarizer: S,
    agent: A,
    max_content_chars: usize,
}

/// Context wired to the real page fetcher, model and search API
pub type LiveContext = AppContext<
    Fetcher,
    Summarizer<openai::CompletionModel>,
    InsightAgent<openai::CompletionModel>,
>;

impl LiveContext {
    /// Build the context from configuration and environment credentials
    pub async fn from_env(
        model_config: &ModelConfig,
        fetcher_config: FetcherConfig,
        agent_config: AgentConfig,
    ) -> crate::Result<Self> {
        let client = Client::new_openrouter_from_env(model_config);
        let fetcher = Fetcher::new(fetcher_config)?;
        let summarizer = Summarizer::new(&client);
        let agent = InsightAgent::builder(&client)
            .config(agent_config)
            .tool(TavilySearch::from_env(SEARCH_RESULTS)?)
            .await
            .build();

        info!(model = %model_config.model, "Application context ready");
        Ok(Self::new(fetcher, summarizer, agent))
    }
}

impl<F, S, A> AppContext<F, S, A>
where
    F: ContentSource + Sync,
    S: Summarize + Sync,
    A: Analyze + Sync,
{
    pub fn new(fetcher: F, summarizer: S, agent: A) -> Self {
        Self {
            fetcher,
            summarizer,
            agent,
            max_content_chars: MAX_CONTENT_CHARS,
        }
    }

    /// Override the content cap
    pub fn with_max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
    }

    /// Analyze a URL and return the summary and the analysis
    #[instrument(skip(self))]
    pub async fn process(&self, url: Option<&str>) -> Analysis {
        let Some(url) = url.filter(|url| !url.is_empty()) else {
            warn!("No URL provided");
            return Analysis::new(NO_URL, NO_URL_ANALYSIS);
        };

        if !is_valid_url(url) {
            warn!("Invalid URL");
            return Analysis::new(INVALID_URL, INVALID_URL_ANALYSIS);
        }

        // Only a fetch error short-circuits; page text is never inspected for a prefix.
        let content = match self.fetcher.fetch(url).await {
            Ok(content) => content,
            Err(e) => {
                let message = sanitize(&describe_fetch_error(&e));
                warn!(error = %e, "Fetch failed");
                return Analysis::new(message.clone(), message);
            }
        };

        let content = truncate_chars(&content, self.max_content_chars);
        info!(content_chars = content.chars().count(), "Content ready");

        let (summary, analysis) = futures::join!(
            self.summarizer.summarize(content),
            self.agent.analyze(content)
        );

        let summary = summary.unwrap_or_else(|e| {
            warn!(error = %e, "Summary generation failed");
            format!("Summary generation failed: {}", e)
        });
        let analysis = analysis.unwrap_or_else(|e| {
            warn!(error = %e, "Agentic analysis failed");
            format!("Agentic analysis failed: {}", e)
        });

        Analysis::new(sanitize(&summary), sanitize(&analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig::completion::CompletionError;
    use std::sync::{Arc, Mutex};

    /// Serves a fixed page or a fixed failure
    struct FakeSource {
        page: Result<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn page(text: impl Into<String>) -> Self {
            Self {
                page: Ok(text.into()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                page: Err(reason.to_string()),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl ContentSource for FakeSource {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.page.clone().map_err(FetchError::Other)
        }
    }

    /// Echoes a prefix plus the length of its input, or fails
    #[derive(Clone, Default)]
    struct FakeModel {
        prefix: &'static str,
        fail: Option<&'static str>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl FakeModel {
        fn answering(prefix: &'static str) -> Self {
            Self {
                prefix,
                ..Self::default()
            }
        }

        fn failing(reason: &'static str) -> Self {
            Self {
                fail: Some(reason),
                ..Self::default()
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }

        fn reply(&self, text: &str) -> Result<String, CompletionError> {
            self.seen.lock().unwrap().push(text.to_string());
            match self.fail {
                Some(reason) => Err(CompletionError::ProviderError(reason.to_string())),
                None => Ok(format!("{} ({} chars)", self.prefix, text.chars().count())),
            }
        }
    }

    impl Summarize for FakeModel {
        async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
            Ok(self.reply(text)?)
        }
    }

    impl Analyze for FakeModel {
        async fn analyze(&self, text: &str) -> Result<String, AgentError> {
            Ok(self.reply(text)?)
        }
    }

    fn context(
        source: FakeSource,
        summarizer: FakeModel,
        agent: FakeModel,
    ) -> AppContext<FakeSource, FakeModel, FakeModel> {
        AppContext::new(source, summarizer, agent)
    }

    #[tokio::test]
    async fn test_missing_url() {
        let summarizer = FakeModel::answering("summary");
        let ctx = context(FakeSource::page("text"), summarizer.clone(), FakeModel::default());

        for input in [None, Some("")] {
            let result = ctx.process(input).await;
            assert_eq!(result, Analysis::new(NO_URL, NO_URL_ANALYSIS));
        }
        assert!(summarizer.seen().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let source = FakeSource::page("text");
        let ctx = context(source, FakeModel::default(), FakeModel::default());

        for input in ["not a url", "example.com", " https://example.com"] {
            let result = ctx.process(Some(input)).await;
            assert_eq!(result.summary, "Invalid URL");
            assert_eq!(result.analysis, "No analysis (invalid URL)");
        }
        assert!(ctx.fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_shown_twice() {
        let summarizer = FakeModel::answering("summary");
        let agent = FakeModel::answering("analysis");
        let ctx = context(
            FakeSource::failing("connection refused"),
            summarizer.clone(),
            agent.clone(),
        );

        let result = ctx.process(Some("https://example.com/page")).await;

        assert_eq!(result.summary, result.analysis);
        assert_eq!(result.summary, "Error scraping content: connection refused");
        assert!(summarizer.seen().is_empty());
        assert!(agent.seen().is_empty());
    }

    #[tokio::test]
    async fn test_page_text_starting_with_error_is_analyzed() {
        let summarizer = FakeModel::answering("summary");
        let agent = FakeModel::answering("analysis");
        let ctx = context(
            FakeSource::page("Error handling in Rust"),
            summarizer.clone(),
            agent.clone(),
        );

        let result = ctx.process(Some("https://example.com/errors")).await;

        assert_eq!(result.summary, "summary (22 chars)");
        assert_eq!(result.analysis, "analysis (22 chars)");
        assert_eq!(summarizer.seen(), vec!["Error handling in Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_both_generators_get_the_same_capped_content() {
        let page = "é".repeat(7000);
        let summarizer = FakeModel::answering("summary");
        let agent = FakeModel::answering("analysis");
        let ctx = context(FakeSource::page(page), summarizer.clone(), agent.clone());

        let result = ctx.process(Some("https://example.com")).await;

        assert_eq!(result.summary, "summary (6000 chars)");
        assert_eq!(result.analysis, "analysis (6000 chars)");
        assert_eq!(summarizer.seen(), agent.seen());
        assert_eq!(summarizer.seen()[0].chars().count(), 6000);
    }

    #[tokio::test]
    async fn test_short_content_is_passed_unchanged() {
        let summarizer = FakeModel::answering("summary");
        let ctx = context(
            FakeSource::page("A short page."),
            summarizer.clone(),
            FakeModel::answering("analysis"),
        );

        ctx.process(Some("https://example.com")).await;
        assert_eq!(summarizer.seen(), vec!["A short page.".to_string()]);
    }

    #[tokio::test]
    async fn test_summary_failure_leaves_analysis_intact() {
        let ctx = context(
            FakeSource::page("page"),
            FakeModel::failing("quota exceeded"),
            FakeModel::answering("analysis"),
        );

        let result = ctx.process(Some("https://example.com")).await;

        assert!(result.summary.starts_with("Summary generation failed: "));
        assert!(result.summary.contains("quota exceeded"));
        assert_eq!(result.analysis, "analysis (4 chars)");
    }

    #[tokio::test]
    async fn test_analysis_failure_leaves_summary_intact() {
        let ctx = context(
            FakeSource::page("page"),
            FakeModel::answering("summary"),
            FakeModel::failing("model unavailable"),
        );

        let result = ctx.process(Some("https://example.com")).await;

        assert_eq!(result.summary, "summary (4 chars)");
        assert!(result.analysis.starts_with("Agentic analysis failed: "));
        assert!(result.analysis.contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_outputs_are_sanitized() {
        struct Noisy;

        impl Summarize for Noisy {
            async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
                Ok("key\u{FFFD} info\u{0007}".to_string())
            }
        }

        impl Analyze for Noisy {
            async fn analyze(&self, _text: &str) -> Result<String, AgentError> {
                Ok("line one\nline two\u{0000}".to_string())
            }
        }

        let ctx = AppContext::new(FakeSource::page("page"), Noisy, Noisy);
        let result = ctx.process(Some("https://example.com")).await;

        assert_eq!(result.summary, "key info");
        assert_eq!(result.analysis, "line one\nline two");
    }

    #[tokio::test]
    async fn test_custom_content_cap() {
        let summarizer = FakeModel::answering("summary");
        let ctx = context(
            FakeSource::page("abcdefghij"),
            summarizer.clone(),
            FakeModel::answering("analysis"),
        )
        .with_max_content_chars(4);

        ctx.process(Some("https://example.com")).await;
        assert_eq!(summarizer.seen(), vec!["abcd".to_string()]);
    }

    #[tokio::test]
    #[ignore = "requires network access, OPENROUTER_API_KEY and TAVILY_API_KEY"]
    async fn test_live_adele_page() {
        let ctx = LiveContext::from_env(
            &ModelConfig::default(),
            FetcherConfig::default(),
            AgentConfig::default(),
        )
        .await
        .unwrap();

        let result = ctx
            .process(Some("https://en.wikipedia.org/wiki/Hello_(Adele_song)"))
            .await;

        assert!(!result.summary.is_empty());
        assert!(!result.analysis.is_empty());
        assert!(!result.summary.starts_with("Error scraping content:"));
        assert!(!result.summary.starts_with("Summary generation failed:"));
        assert!(!result.analysis.starts_with("Agentic analysis failed:"));
    }
}
