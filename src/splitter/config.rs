//! # Splitter Configuration
//!
//! Controls how extracted page text is cut into overlapping segments before
//! it is handed to the language model. Sizes are measured in characters
//! (Unicode scalar values).

use crate::splitter::error::SplitError;

/// Configuration for splitting text into segments
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Maximum size of each segment in characters
    pub chunk_size: usize,

    /// Maximum number of characters carried over from one segment to the next
    pub chunk_overlap: usize,

    /// Separators tried in order, coarsest first. An empty string splits
    /// between individual characters.
    pub separators: Vec<String>,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            separators: vec![
                "\n\n".to_string(),
                "\n".to_string(),
                " ".to_string(),
                String::new(),
            ],
        }
    }
}

impl ChunkOptions {
    /// Create options with the given size and overlap and the default separators
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            ..Default::default()
        }
    }

    /// Replace the separator list
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the options describe a usable splitter
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.chunk_size == 0 {
            return Err(SplitError::InvalidOptions(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap > self.chunk_size {
            return Err(SplitError::InvalidOptions(format!(
                "chunk overlap ({}) is larger than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}
