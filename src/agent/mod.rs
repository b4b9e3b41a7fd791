//! # Insight Agent Module
//!
//! A tool-using reasoning agent that turns page text into a 10-12 line
//! analysis. The agent follows a Thought / Action / Observation protocol and
//! may consult web search before answering.
//!
//! ## Key Components
//!
//! - `AgentConfig`: iteration budget, early stopping and stop sequences
//! - `InsightAgent`: the configured agent, built once and shared read-only
//! - `ReactExecutor`: the reasoning loop itself
//! - `react`: prompt template and reply parser

mod config;
mod error;
mod executor;
pub mod react;

pub use config::{AgentConfig, EarlyStopping, STOPPED_MESSAGE};
pub use error::AgentError;
pub use executor::ReactExecutor;

use crate::model::Client;
use rig::{
    agent::AgentBuilder,
    completion::{CompletionModel, ToolDefinition},
    tool::{Tool, ToolSet, ToolSetBuilder},
};
use serde_json::json;
use tracing::{debug, instrument};

/// Build the question handed to the agent; the text is embedded verbatim.
pub fn analysis_input(text: &str) -> String {
    format!(
        "Analyze this content and give deep insights as summary of 10-12 lines strictly: {}",
        text
    )
}

/// Reasoning agent producing the deep analysis of a page
pub struct InsightAgent<M>
where
    M: CompletionModel,
{
    executor: ReactExecutor<M>,
}

impl<M> InsightAgent<M>
where
    M: CompletionModel,
{
    pub fn builder(client: &Client<M>) -> InsightAgentBuilder<M> {
        InsightAgentBuilder {
            agent: client.agent(),
            tools: ToolSet::builder(),
            tool_defs: Vec::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        self.executor.config()
    }

    /// Names of the tools the agent may call
    pub fn tool_names(&self) -> Vec<String> {
        self.executor
            .tool_definitions()
            .iter()
            .map(|def| def.name.clone())
            .collect()
    }

    /// Produce the analysis of a text
    #[instrument(name = "analyze", skip_all, fields(text_len = text.len()))]
    pub async fn analyze(&self, text: &str) -> Result<String, AgentError> {
        self.executor.run(&analysis_input(text)).await
    }
}

pub struct InsightAgentBuilder<M>
where
    M: CompletionModel,
{
    agent: AgentBuilder<M>,
    tools: ToolSetBuilder,
    tool_defs: Vec<ToolDefinition>,
    config: AgentConfig,
}

impl<M> InsightAgentBuilder<M>
where
    M: CompletionModel,
{
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Make a tool available to the agent
    pub async fn tool<T>(mut self, tool: T) -> Self
    where
        T: Tool + 'static,
    {
        let definition = tool.definition(String::new()).await;
        debug!(tool_name = %definition.name, "Registering tool");
        self.tool_defs.push(definition);
        self.tools = self.tools.static_tool(tool);
        self
    }

    pub fn build(self) -> InsightAgent<M> {
        let mut agent = self.agent;
        if !self.config.stop_sequences.is_empty() {
            agent = agent.additional_params(json!({ "stop": self.config.stop_sequences }));
        }

        InsightAgent {
            executor: ReactExecutor::new(
                agent.build(),
                self.tools.build(),
                self.tool_defs,
                self.config,
            ),
        }
    }
}
