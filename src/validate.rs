//! Syntactic URL validation
//!
//! A URL is accepted when it is absolute, carries a scheme and a non-empty
//! host, and has no surrounding whitespace. No network access is performed.

use url::Url;

/// Returns true if `url` is a well-formed absolute URL (scheme + host).
pub fn is_valid_url(url: &str) -> bool {
    // `Url::parse` silently strips surrounding whitespace.
    if url.is_empty() || url.trim() != url {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            !parsed.cannot_be_a_base() && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_absolute_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1#frag"));
        assert!(is_valid_url("https://en.wikipedia.org/wiki/Hello_(Adele_song)"));
        assert!(is_valid_url("http://127.0.0.1:8080/page"));
        assert!(is_valid_url("ftp://files.example.org/pub"));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url(" https://example.com"));
        assert!(!is_valid_url("https://exa mple.com"));
    }
}
