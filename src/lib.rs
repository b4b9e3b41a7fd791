//! # webinsight - LLM summaries and agentic analysis of web pages
//!
//! Given a URL, this crate fetches the page, keeps a bounded amount of its
//! text and asks a hosted language model for two views of it: a key-insight
//! summary and a 10-12 line analysis written by a tool-using agent that may
//! consult web search.
//!
//! ## Features
//!
//! - URL validation and single-page fetching with HTML text extraction
//! - Recursive character splitting with overlap
//! - Summaries through any rig `CompletionModel` (OpenRouter by default)
//! - A Thought / Action / Observation agent with Tavily web search
//! - Concurrent generation with independent failure reporting
//! - A web form and JSON API served with axum
//!
//! ## Example
//!
//! ```rust,no_run
//! use webinsight::agent::AgentConfig;
//! use webinsight::fetcher::FetcherConfig;
//! use webinsight::model::ModelConfig;
//! use webinsight::orchestrator::LiveContext;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = LiveContext::from_env(
//!         &ModelConfig::default(),
//!         FetcherConfig::default(),
//!         AgentConfig::default(),
//!     )
//!     .await?;
//!
//!     let result = ctx
//!         .process(Some("https://en.wikipedia.org/wiki/Hello_(Adele_song)"))
//!         .await;
//!     println!("{}\n\n{}", result.summary, result.analysis);
//!     Ok(())
//! }
//! ```

mod error;
pub mod model;

pub mod agent;
pub mod fetcher;
pub mod orchestrator;
pub mod splitter;
pub mod summarizer;
pub mod text;
pub mod tools;
pub mod validate;
pub mod web;

pub use error::{Error, Result};

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::orchestrator::{Analysis, AppContext};
}
