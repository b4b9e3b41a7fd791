//! Reasoning loop that alternates model turns with tool calls.
//!
//! Each turn the model either names a tool to run or gives its final answer.
//! Tool results, unknown tool names and malformed replies are all turned into
//! observations and fed back, so only a failing model request or an exhausted
//! budget ends the loop early.

use rig::{
    agent::Agent,
    completion::{Completion as _, CompletionModel, CompletionResponse, ToolDefinition},
    message::{AssistantContent, Message, ToolCall, ToolResult, ToolResultContent, UserContent},
    one_or_many::OneOrMany,
    tool::ToolSet,
};
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use super::config::{AgentConfig, EarlyStopping, STOPPED_MESSAGE};
use super::error::AgentError;
use super::react::{
    AgentStep, observation_prompt, parse_step, react_prompt, tool_arguments, tool_names,
};
use crate::model::response_text;

/// What the model asked for in one turn
enum Turn {
    Native(ToolCall),
    Text(String),
}

pub struct ReactExecutor<M>
where
    M: CompletionModel,
{
    agent: Agent<M>,
    tools: ToolSet,
    tool_defs: Vec<ToolDefinition>,
    config: AgentConfig,
}

impl<M> ReactExecutor<M>
where
    M: CompletionModel,
{
    pub fn new(
        agent: Agent<M>,
        tools: ToolSet,
        tool_defs: Vec<ToolDefinition>,
        config: AgentConfig,
    ) -> Self {
        Self {
            agent,
            tools,
            tool_defs,
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.tool_defs
    }

    async fn request(
        &self,
        prompt: Message,
        history: &[Message],
    ) -> Result<CompletionResponse<M::Response>, AgentError> {
        let mut request = self.agent.completion(prompt, history.to_vec()).await?;
        if self.config.native_tools {
            request = request.tools(self.tool_defs.clone());
        }
        Ok(request.send().await?)
    }

    /// Run the loop on a question until the model gives a final answer
    #[instrument(name = "agent_execution", skip_all, fields(
        question_len = question.len(),
        max_iterations = self.config.max_iterations
    ))]
    pub async fn run(&self, question: &str) -> Result<String, AgentError> {
        let mut history: Vec<Message> = Vec::new();
        let mut prompt = Message::user(react_prompt(&self.tool_defs, question));
        let mut parse_failures = 0;

        for iteration in 1..=self.config.max_iterations {
            debug!(iteration, "Starting loop iteration");

            let response = self.request(prompt.clone(), &history).await.map_err(|e| {
                error!(error = %e, iteration, "Agent request failed");
                e
            })?;
            history.push(prompt);

            prompt = match classify(&response.choice) {
                Turn::Native(call) => {
                    history.push(Message::Assistant {
                        content: OneOrMany::one(AssistantContent::ToolCall(call.clone())),
                    });
                    let result = self.call_native(&call).await;
                    Message::User {
                        content: OneOrMany::one(UserContent::ToolResult(ToolResult {
                            id: call.id,
                            content: OneOrMany::one(ToolResultContent::text(result)),
                        })),
                    }
                }
                Turn::Text(text) => {
                    history.push(Message::Assistant {
                        content: OneOrMany::one(AssistantContent::text(&text)),
                    });
                    match parse_step(&text) {
                        Ok(AgentStep::Finish(answer)) => {
                            info!(iteration, answer_len = answer.len(), "Agent finished");
                            return Ok(answer);
                        }
                        Ok(AgentStep::Action { tool, input }) => {
                            info!(thought = %text, "Agent thought");
                            let observation = self.call_tool(&tool, &input).await;
                            Message::user(observation_prompt(&observation))
                        }
                        Err(e) => {
                            parse_failures += 1;
                            warn!(error = %e, parse_failures, "Could not parse agent reply");
                            Message::user(observation_prompt(&e.observation))
                        }
                    }
                }
            };
        }

        warn!(
            max_iterations = self.config.max_iterations,
            parse_failures, "Execution reached max iterations"
        );
        match self.config.early_stopping {
            EarlyStopping::Force => Ok(STOPPED_MESSAGE.to_string()),
            EarlyStopping::Error => Err(AgentError::MaxIterations(self.config.max_iterations)),
        }
    }

    /// Run a tool named in a text reply
    async fn call_tool(&self, name: &str, input: &str) -> String {
        let Some(definition) = self.tool_defs.iter().find(|def| def.name == name) else {
            warn!(tool_name = %name, "Agent asked for an unknown tool");
            return unknown_tool(name, &self.tool_defs);
        };
        self.invoke(name, tool_arguments(definition, input)).await
    }

    /// Run a tool requested through native tool calling
    async fn call_native(&self, call: &ToolCall) -> String {
        let name = &call.function.name;
        if !self.tool_defs.iter().any(|def| &def.name == name) {
            warn!(tool_name = %name, "Agent asked for an unknown tool");
            return unknown_tool(name, &self.tool_defs);
        }
        self.invoke(name, call.function.arguments.to_string()).await
    }

    #[instrument(name = "execute_tool_call", skip(self, args_json))]
    async fn invoke(&self, name: &str, args_json: String) -> String {
        debug!(tool_args = %args_json, "Executing tool call");

        match self.tools.call(name, args_json).await {
            Ok(result) if result.is_empty() => {
                warn!(tool_name = %name, "Tool returned empty result");
                json!({ "result": "Tool returned no result" }).to_string()
            }
            Ok(result) => {
                debug!(tool_name = %name, result_len = result.len(), "Tool call completed");
                result
            }
            Err(e) => {
                error!(error = %e, tool_name = %name, "Tool call execution failed");
                format!("Tool call '{}' failed: {}", name, e)
            }
        }
    }
}

fn classify(choice: &OneOrMany<AssistantContent>) -> Turn {
    let native = choice.iter().find_map(|content| match content {
        AssistantContent::ToolCall(call) => Some(call.clone()),
        _ => None,
    });
    match native {
        Some(call) => Turn::Native(call),
        None => Turn::Text(response_text(choice)),
    }
}

fn unknown_tool(name: &str, tools: &[ToolDefinition]) -> String {
    format!(
        "{} is not a valid tool, try one of [{}].",
        name,
        tool_names(tools)
    )
}
