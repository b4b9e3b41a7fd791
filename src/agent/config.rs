//! Configuration for the insight agent

/// What to do once the iteration budget is spent without a final answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EarlyStopping {
    /// Return a fixed stop message as the answer
    #[default]
    Force,
    /// Fail the analysis
    Error,
}

/// Answer returned when the budget runs out under `EarlyStopping::Force`
pub const STOPPED_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

/// Configuration for the reasoning loop
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum number of model turns, parse failures included
    pub max_iterations: usize,

    /// Behaviour when the budget is exhausted
    pub early_stopping: EarlyStopping,

    /// Stop sequences sent with every request so the model does not invent
    /// its own observations
    pub stop_sequences: Vec<String>,

    /// Offer tools through the provider's native tool-calling API as well
    pub native_tools: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            early_stopping: EarlyStopping::Force,
            stop_sequences: vec!["\nObservation:".to_string()],
            native_tools: false,
        }
    }
}

impl AgentConfig {
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn early_stopping(mut self, early_stopping: EarlyStopping) -> Self {
        self.early_stopping = early_stopping;
        self
    }

    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = stop_sequences;
        self
    }

    pub fn native_tools(mut self, native_tools: bool) -> Self {
        self.native_tools = native_tools;
        self
    }
}
