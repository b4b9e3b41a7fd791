//! # webinsight CLI
//!
//! Command-line entry point. Serves the web form by default, or analyzes a
//! single URL and prints both outputs.
//!
//! ## Subcommands
//!
//! - `serve`: HTTP server with the analysis form and JSON API
//! - `analyze`: one-shot analysis of a URL, as text or JSON
//!
//! Credentials come from `OPENROUTER_API_KEY` and `TAVILY_API_KEY`; a missing
//! key is logged at start-up and fails the first request that needs it.

mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::{info, instrument};
use webinsight::{
    agent::AgentConfig,
    fetcher::FetcherConfig,
    model::{self, ModelConfig},
    orchestrator::{Analysis, LiveContext},
    web,
};

#[derive(Parser)]
#[command(author, version, about = "Summarize and analyze web pages with an LLM agent", long_about = None)]
struct Cli {
    /// Model identifier on OpenRouter
    #[arg(short, long, global = true, default_value = model::DEFAULT_MODEL)]
    model: String,

    /// Maximum reasoning steps of the agent
    #[arg(long, global = true, default_value = "15")]
    max_iterations: usize,

    /// Export traces and metrics over OTLP
    #[arg(long, global = true)]
    otlp: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the web interface (default)
    Serve(ServeArgs),

    /// Analyze a single URL and print the results
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = web::DEFAULT_HOST)]
    host: String,

    /// Port to bind
    #[arg(short, long, default_value_t = web::DEFAULT_PORT)]
    port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: web::DEFAULT_HOST.to_string(),
            port: web::DEFAULT_PORT,
        }
    }
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// URL to analyze
    #[arg(required = true)]
    url: String,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _otel = telemetry::init_tracing_subscriber(cli.otlp)?;

    let ctx = build_context(&cli).await?;

    match cli.command {
        Some(Commands::Serve(args)) => serve_command(ctx, args).await?,
        Some(Commands::Analyze(args)) => analyze_command(ctx, args).await?,
        None => serve_command(ctx, ServeArgs::default()).await?,
    }

    Ok(())
}

async fn build_context(cli: &Cli) -> anyhow::Result<LiveContext> {
    let model_config = ModelConfig::default().model(cli.model.clone());
    let agent_config = AgentConfig::default().max_iterations(cli.max_iterations);

    LiveContext::from_env(&model_config, FetcherConfig::default(), agent_config)
        .await
        .context("Failed to build application context")
}

#[instrument(skip(ctx))]
async fn serve_command(ctx: LiveContext, args: ServeArgs) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;

    info!("Serving on http://{}", addr);
    web::serve(Arc::new(ctx), addr).await?;
    Ok(())
}

#[instrument(skip(ctx))]
async fn analyze_command(ctx: LiveContext, args: AnalyzeArgs) -> anyhow::Result<()> {
    let result = ctx.process(Some(&args.url)).await;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_text(&result);
    }
    Ok(())
}

fn print_text(result: &Analysis) {
    println!("Key Info\n========\n{}\n", result.summary);
    println!("Concise Summary\n===============\n{}", result.analysis);
}
