//! # Recursive Character Splitting
//!
//! Splits text into segments of at most `chunk_size` characters that overlap
//! by up to `chunk_overlap` characters.
//!
//! ## Strategy
//!
//! 1. Pick the first separator from the configured list that occurs in the
//!    text. An empty separator always matches and splits between characters.
//! 2. Split on it, keeping each separator attached to the start of the piece
//!    that follows it, so no text is lost.
//! 3. Pieces shorter than the chunk size are merged greedily into segments.
//!    Oversized pieces are split again with the finer separators.
//! 4. When a segment is emitted, pieces are dropped from its front until what
//!    remains fits in the overlap budget; that remainder opens the next one.
//!
//! Splitting on paragraph breaks first keeps segments aligned with the
//! structure of the page wherever the sizes allow it.

use std::collections::VecDeque;

use crate::splitter::ChunkOptions;
use crate::splitter::error::SplitError;
use tracing::{debug, instrument, warn};

/// Split text into overlapping segments
///
/// # Arguments
///
/// * `text` - The text to split
/// * `options` - Segment size, overlap and separators
///
/// # Returns
///
/// The segments in document order, each trimmed of surrounding whitespace
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn split_text(text: &str, options: &ChunkOptions) -> Result<Vec<String>, SplitError> {
    options.validate()?;

    let separators: Vec<&str> = options.separators.iter().map(String::as_str).collect();
    let chunks = split_recursive(text, &separators, options);

    debug!("Created {} chunks", chunks.len());
    Ok(chunks)
}

fn split_recursive(text: &str, separators: &[&str], options: &ChunkOptions) -> Vec<String> {
    let mut separator = separators.last().copied().unwrap_or("");
    let mut finer: &[&str] = &[];
    for (i, candidate) in separators.iter().enumerate() {
        if candidate.is_empty() {
            separator = *candidate;
            break;
        }
        if text.contains(candidate) {
            separator = *candidate;
            finer = &separators[i + 1..];
            break;
        }
    }

    let mut chunks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for piece in split_keeping_separator(text, separator) {
        if char_len(piece) < options.chunk_size {
            pending.push(piece);
            continue;
        }

        if !pending.is_empty() {
            chunks.extend(merge_pieces(&pending, options));
            pending.clear();
        }

        if finer.is_empty() {
            chunks.push(piece.to_string());
        } else {
            chunks.extend(split_recursive(piece, finer, options));
        }
    }

    if !pending.is_empty() {
        chunks.extend(merge_pieces(&pending, options));
    }

    chunks
}

/// Split `text` on `separator`, attaching each separator to the piece after it.
/// Empty pieces are dropped.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(separator) {
        if idx > start {
            pieces.push(&text[start..idx]);
        }
        start = idx;
    }
    pieces.push(&text[start..]);

    pieces.retain(|piece| !piece.is_empty());
    pieces
}

/// Greedily pack small pieces into segments, carrying an overlap forward
fn merge_pieces(pieces: &[&str], options: &ChunkOptions) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let len = char_len(piece);

        if total + len > options.chunk_size {
            if total > options.chunk_size {
                warn!(
                    "Created a chunk of size {}, which is longer than the specified {}",
                    total, options.chunk_size
                );
            }

            if !current.is_empty() {
                if let Some(segment) = join_pieces(&current) {
                    segments.push(segment);
                }

                while total > options.chunk_overlap
                    || (total + len > options.chunk_size && total > 0)
                {
                    match current.pop_front() {
                        Some(front) => total -= char_len(front),
                        None => break,
                    }
                }
            }
        }

        current.push_back(piece);
        total += len;
    }

    if let Some(segment) = join_pieces(&current) {
        segments.push(segment);
    }

    segments
}

fn join_pieces(pieces: &VecDeque<&str>) -> Option<String> {
    let joined: String = pieces.iter().copied().collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(count: usize, width: usize) -> String {
        (0..count)
            .map(|i| {
                let head = format!("Paragraph {i:02}:");
                let filler = "lorem ipsum ".repeat(width / 12 + 1);
                let body: String = format!("{head} {filler}").chars().take(width).collect();
                body.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let text = "  A short page.\n\nWith two paragraphs.  ";
        let chunks = split_text(text, &ChunkOptions::default()).unwrap();
        assert_eq!(chunks, vec!["A short page.\n\nWith two paragraphs.".to_string()]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_text("", &ChunkOptions::default()).unwrap().is_empty());
        assert!(split_text(" \n\n \n", &ChunkOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_paragraph_chunks_respect_size_and_overlap() {
        let text = paragraphs(30, 100);
        let options = ChunkOptions::default();
        let chunks = split_text(&text, &options).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= options.chunk_size);
        }

        // The last paragraph of a chunk opens the next one.
        for pair in chunks.windows(2) {
            let first_line = pair[1].lines().next().unwrap();
            assert!(
                pair[0].contains(first_line),
                "expected overlap between consecutive chunks"
            );
        }

        // Every paragraph survives somewhere.
        for i in 0..30 {
            let marker = format!("Paragraph {i:02}:");
            assert!(chunks.iter().any(|c| c.contains(&marker)), "missing {marker}");
        }
    }

    #[test]
    fn test_unbroken_text_falls_back_to_characters() {
        let text: String = (0..2500)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let chunks = split_text(&text, &ChunkOptions::default()).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 1000);
        assert_eq!(chunks[2].chars().count(), 900);

        let tail: String = chunks[0].chars().skip(800).collect();
        assert!(chunks[1].starts_with(&tail));
        assert_eq!(chunks[0], text.chars().take(1000).collect::<String>());
    }

    #[test]
    fn test_sizes_are_measured_in_characters() {
        let text = "é".repeat(1500);
        let chunks = split_text(&text, &ChunkOptions::default()).unwrap();

        assert_eq!(chunks[0].chars().count(), 1000);
        for chunk in &chunks {
            String::from_utf8(chunk.as_bytes().to_vec()).unwrap();
        }
    }

    #[test]
    fn test_oversized_paragraph_is_split_on_words() {
        let long_paragraph = "word ".repeat(400);
        let text = format!("Intro line.\n\n{}\n\nOutro line.", long_paragraph.trim_end());
        let options = ChunkOptions::new(300, 50);
        let chunks = split_text(&text, &options).unwrap();

        assert!(chunks.first().unwrap().starts_with("Intro line."));
        assert!(chunks.last().unwrap().ends_with("Outro line."));
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 300);
            assert!(!chunk.contains("wordword"), "words must not be glued together");
        }
    }

    #[test]
    fn test_split_keeping_separator_preserves_text() {
        let text = "\n\na\n\n\n\nb\n\nc";
        let pieces = split_keeping_separator(text, "\n\n");
        assert_eq!(pieces, vec!["\n\na", "\n\n", "\n\nb", "\n\nc"]);
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let err = split_text("text", &ChunkOptions::new(100, 200)).unwrap_err();
        assert!(matches!(err, SplitError::InvalidOptions(_)));

        assert!(split_text("text", &ChunkOptions::new(0, 0)).is_err());
    }

    #[test]
    fn test_custom_separators() {
        let options = ChunkOptions::new(10, 0).with_separators(["|"]);
        let chunks = split_text("aaaa|bbbb|cccc", &options).unwrap();
        assert_eq!(chunks, vec!["aaaa|bbbb".to_string(), "|cccc".to_string()]);
    }
}
