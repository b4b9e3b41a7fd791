//! Text protocol of the reasoning loop.
//!
//! The model is asked to answer in `Thought:` / `Action:` / `Action Input:`
//! blocks and to finish with `Final Answer:`. Every reply is parsed into an
//! [`AgentStep`]; replies that follow neither shape become a [`ParseError`]
//! whose observation is shown to the model on the next turn.

use std::sync::LazyLock;

use regex::Regex;
use rig::completion::ToolDefinition;
use serde_json::{Value, json};
use thiserror::Error;

pub const FINAL_ANSWER: &str = "Final Answer:";

/// Marker of an observation the model wrote itself
pub const OBSERVATION_MARKER: &str = "\nObservation:";

pub const MISSING_ACTION: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";
pub const MISSING_ACTION_INPUT: &str = "Invalid Format: Missing 'Action Input:' after 'Action:'";
pub const INVALID_RESPONSE: &str = "Invalid or incomplete response";

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .expect("valid action regex")
});
static ACTION_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Action\s*\d*\s*:").expect("valid action regex"));
static ACTION_INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)[\s]*Action\s*\d*\s*Input\s*\d*\s*:").expect("valid action input regex")
});

/// One parsed model turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    /// Run a tool with the given raw input
    Action { tool: String, input: String },
    /// The final answer
    Finish(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not parse LLM output: `{text}`")]
pub struct ParseError {
    /// What the model is told on the next turn
    pub observation: String,
    /// The unparseable reply
    pub text: String,
}

impl ParseError {
    fn new(text: &str, observation: &str) -> Self {
        Self {
            observation: observation.to_string(),
            text: text.to_string(),
        }
    }
}

/// Build the opening prompt listing the available tools
pub fn react_prompt(tools: &[ToolDefinition], question: &str) -> String {
    let descriptions = tools
        .iter()
        .map(|tool| format!("{}: {}", tool.name, tool.description))
        .collect::<Vec<_>>()
        .join("\n");
    let names = tool_names(tools);

    format!(
        "Answer the following questions as best you can. You have access to the following tools:

{descriptions}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!

Question: {question}
Thought:"
    )
}

/// Comma separated tool names
pub fn tool_names(tools: &[ToolDefinition]) -> String {
    tools
        .iter()
        .map(|tool| tool.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The message that carries a tool result back to the model
pub fn observation_prompt(observation: &str) -> String {
    format!("Observation: {}\nThought:", observation)
}

/// Parse one model reply.
///
/// Anything after a self-written `Observation:` is ignored. A final answer
/// that precedes an action wins; an action that precedes a final answer is
/// ambiguous and rejected.
pub fn parse_step(output: &str) -> Result<AgentStep, ParseError> {
    let text = match output.find(OBSERVATION_MARKER) {
        Some(end) => &output[..end],
        None => output,
    };
    let final_at = text.find(FINAL_ANSWER);

    match (ACTION_RE.captures(text), final_at) {
        (Some(captures), Some(final_at)) => {
            let action_at = captures.get(0).map_or(0, |m| m.start());
            if final_at < action_at {
                let start = final_at + FINAL_ANSWER.len();
                let end = text[start..]
                    .find("\n\n")
                    .map_or(text.len(), |offset| start + offset);
                Ok(AgentStep::Finish(text[start..end].trim().to_string()))
            } else {
                Err(ParseError::new(text, INVALID_RESPONSE))
            }
        }
        (Some(captures), None) => {
            let tool = captures.get(1).map_or("", |m| m.as_str()).trim();
            let input = captures
                .get(2)
                .map_or("", |m| m.as_str())
                .trim()
                .trim_matches('"');
            Ok(AgentStep::Action {
                tool: tool.to_string(),
                input: input.to_string(),
            })
        }
        (None, Some(_)) => {
            let answer = text
                .rsplit(FINAL_ANSWER)
                .next()
                .unwrap_or_default()
                .trim();
            Ok(AgentStep::Finish(answer.to_string()))
        }
        (None, None) => {
            if !ACTION_ONLY_RE.is_match(text) {
                Err(ParseError::new(text, MISSING_ACTION))
            } else if !ACTION_INPUT_RE.is_match(text) {
                Err(ParseError::new(text, MISSING_ACTION_INPUT))
            } else {
                Err(ParseError::new(text, INVALID_RESPONSE))
            }
        }
    }
}

/// Turn a free-text action input into JSON arguments for a tool.
///
/// A JSON object is passed through. Otherwise the text becomes the value of
/// the tool's single required parameter, falling back to its first declared
/// property.
pub fn tool_arguments(definition: &ToolDefinition, input: &str) -> String {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(input) {
        return value.to_string();
    }

    let required = definition
        .parameters
        .get("required")
        .and_then(Value::as_array)
        .filter(|keys| keys.len() == 1)
        .and_then(|keys| keys[0].as_str());
    let first_property = definition
        .parameters
        .get("properties")
        .and_then(Value::as_object)
        .and_then(|props| props.keys().next().map(String::as_str));
    let key = required.or(first_property).unwrap_or("input");

    let mut args = serde_json::Map::new();
    args.insert(key.to_string(), json!(input));
    Value::Object(args).to_string()
}
