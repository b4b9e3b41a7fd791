//! Tools the insight agent can call
//!
//! - Search: web search through the Tavily API

mod error;
pub mod search;

pub use error::SearchToolError;
pub use search::TavilySearch;
