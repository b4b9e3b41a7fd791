//! Text helpers shared by the fetcher and the orchestrator: sanitization of
//! user-visible output and character-bounded truncation.

/// Maximum number of characters handed to the summarizer and the agent.
pub const MAX_CONTENT_CHARS: usize = 6000;

/// Drop everything that is not displayable text.
///
/// Removes U+FFFD replacement characters (left behind by lossy decoding
/// upstream) and control characters other than `\n`, `\r` and `\t`.
/// Applying it twice yields the same result as applying it once.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| is_displayable(*c)).collect()
}

fn is_displayable(c: char) -> bool {
    match c {
        '\u{FFFD}' => false,
        '\n' | '\r' | '\t' => true,
        c => !c.is_control(),
    }
}

/// Return at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
