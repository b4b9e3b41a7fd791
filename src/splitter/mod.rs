//! Text splitter for fetched page content
//!
//! This module cuts extracted page text into bounded, overlapping segments so
//! that only a predictable amount of a page reaches the language model.

mod chunking;
mod config;
mod error;

pub use chunking::split_text;
pub use config::ChunkOptions;
pub use error::SplitError;
