//! Content extraction functionality for the fetcher module

use crate::fetcher::PageMetadata;
use crate::fetcher::error::FetchError;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Elements that start a new line in the extracted text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Extract the visible text of an HTML document
///
/// Text nodes below `<body>` are collected in document order, skipping
/// anything nested in one of `skipped_elements`. Whitespace is collapsed per
/// line and blank lines are dropped.
///
/// # Arguments
///
/// * `html` - The HTML to extract text from
/// * `skipped_elements` - Element names whose text is ignored
///
/// # Returns
///
/// The page text, one block element per line
pub fn extract_text(html: &str, skipped_elements: &[String]) -> Result<String, FetchError> {
    let document = Html::parse_document(html);

    let body_selector = Selector::parse("body")
        .map_err(|e| FetchError::HtmlParse(format!("Failed to parse body selector: {}", e)))?;
    let root = document
        .select(&body_selector)
        .next()
        .unwrap_or_else(|| document.root_element());

    Ok(normalize_whitespace(&collect_text(root, skipped_elements)))
}

fn collect_text(root: ElementRef<'_>, skipped_elements: &[String]) -> String {
    let is_skipped = |name: &str| skipped_elements.iter().any(|s| s.eq_ignore_ascii_case(name));

    let mut raw = String::new();
    for node in root.descendants() {
        match node.value() {
            Node::Element(element) if BLOCK_ELEMENTS.contains(&element.name()) => {
                raw.push('\n');
            }
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
                    Node::Element(element) => is_skipped(element.name()),
                    _ => false,
                });
                if !hidden {
                    raw.push_str(text);
                }
            }
            _ => {}
        }
    }
    raw
}

/// Collapse runs of whitespace within each line and drop blank lines
pub fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract metadata from a page
///
/// # Arguments
///
/// * `url` - The URL of the page
/// * `html` - The HTML of the page
///
/// # Returns
///
/// The extracted metadata
pub fn extract_metadata(url: &str, html: &str) -> Result<PageMetadata, FetchError> {
    let document = Html::parse_document(html);

    let parsed_url = Url::parse(url)?;
    let domain = parsed_url
        .host_str()
        .ok_or_else(|| FetchError::Other("Failed to extract domain from URL".to_string()))?
        .to_string();

    let title_selector = Selector::parse("title")
        .map_err(|e| FetchError::HtmlParse(format!("Failed to parse title selector: {}", e)))?;
    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    let description_selector = Selector::parse("meta[name='description']").map_err(|e| {
        FetchError::HtmlParse(format!("Failed to parse description selector: {}", e))
    })?;
    let description = document
        .select(&description_selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|s| s.to_string());

    Ok(PageMetadata {
        title,
        description,
        domain,
    })
}
