//! # Web Module
//!
//! A single-page form for submitting a URL and reading both outputs, plus a
//! JSON endpoint returning the same pair.
//!
//! Routes:
//! - `GET /` renders the empty form; `?url=` pre-fills the input
//! - `POST /analyze` analyzes the submitted form and renders the results
//! - `POST /api/analyze` takes `{"url": ...}` and returns `{"summary", "analysis"}`

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::orchestrator::{Analysis, Analyze, AppContext, ContentSource, Summarize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7866;

const TITLE: &str = "AI Web Content Analyzer";

/// Pages offered as one-click examples
pub const EXAMPLE_URLS: [&str; 2] = [
    "https://en.wikipedia.org/wiki/Artificial_intelligence",
    "https://en.wikipedia.org/wiki/Hello_(Adele_song)",
];

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// JSON body of `POST /api/analyze`. Any non-string `url` counts as missing.
#[derive(Debug, Default, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub url: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn url(&self) -> Option<&str> {
        self.url.as_ref().and_then(|url| url.as_str())
    }
}

/// Build the router over a shared context
pub fn router<F, S, A>(ctx: Arc<AppContext<F, S, A>>) -> Router
where
    F: ContentSource + Send + Sync + 'static,
    S: Summarize + Send + Sync + 'static,
    A: Analyze + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_form::<F, S, A>))
        .route("/api/analyze", post(analyze_json::<F, S, A>))
        .with_state(ctx)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve<F, S, A>(ctx: Arc<AppContext<F, S, A>>, addr: SocketAddr) -> crate::Result<()>
where
    F: ContentSource + Send + Sync + 'static,
    S: Summarize + Send + Sync + 'static,
    A: Analyze + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

async fn index(Query(request): Query<AnalyzeRequest>) -> Html<String> {
    Html(render_page(request.url.as_deref().unwrap_or_default(), None))
}

#[instrument(skip_all)]
async fn analyze_form<F, S, A>(
    State(ctx): State<Arc<AppContext<F, S, A>>>,
    Form(request): Form<AnalyzeRequest>,
) -> Html<String>
where
    F: ContentSource + Send + Sync + 'static,
    S: Summarize + Send + Sync + 'static,
    A: Analyze + Send + Sync + 'static,
{
    info!(url = ?request.url, "Form submission");
    let result = ctx.process(request.url.as_deref()).await;
    Html(render_page(
        request.url.as_deref().unwrap_or_default(),
        Some(&result),
    ))
}

#[instrument(skip_all)]
async fn analyze_json<F, S, A>(
    State(ctx): State<Arc<AppContext<F, S, A>>>,
    Json(request): Json<ApiRequest>,
) -> Json<Analysis>
where
    F: ContentSource + Send + Sync + 'static,
    S: Summarize + Send + Sync + 'static,
    A: Analyze + Send + Sync + 'static,
{
    info!(url = ?request.url, "API request");
    Json(ctx.process(request.url()).await)
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn example_link(url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!(
        r#"<li><a href="/?url={}">{}</a></li>"#,
        encoded,
        escape_html(url)
    )
}

/// Render the page, with results when a submission was processed
pub fn render_page(url: &str, result: Option<&Analysis>) -> String {
    let (summary, analysis) = match result {
        Some(result) => (result.summary.as_str(), result.analysis.as_str()),
        None => ("", ""),
    };
    let examples: String = EXAMPLE_URLS.iter().map(|url| example_link(url)).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 56rem; margin: 2rem auto; padding: 0 1rem; }}
input[type=text] {{ width: 100%; padding: 0.5rem; }}
textarea {{ width: 100%; min-height: 12rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
<form method="post" action="/analyze">
<label for="url">Enter URL</label>
<input type="text" id="url" name="url" placeholder="https://example.com" value="{url}">
<button type="submit">Analyze</button>
</form>
<h2>Examples</h2>
<ul>
{examples}</ul>
<h2>Results</h2>
<label for="summary">Key Info</label>
<textarea id="summary" readonly>{summary}</textarea>
<label for="analysis">Concise Summary</label>
<textarea id="analysis" readonly>{analysis}</textarea>
</body>
</html>
"#,
        title = TITLE,
        url = escape_html(url),
        examples = examples,
        summary = escape_html(summary),
        analysis = escape_html(analysis),
    )
}
