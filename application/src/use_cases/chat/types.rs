//! Type definitions for the Chat use case.

use crate::ports::model_gateway::GatewayError;
use serde::Serialize;
use thiserror::Error;

/// Returned when the model ends a turn without any text.
pub const NO_RESPONSE_TEXT: &str = "No response generated";

/// Returned when the iteration cap is exhausted while the model still asks for tools.
pub const ITERATION_LIMIT_TEXT: &str = "Max iterations reached without final answer";

/// Errors that can occur while processing a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ChatError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChatError::Cancelled)
    }
}

/// How a submitted message finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The model answered with text and no tool calls.
    Final,
    /// The model answered with neither text nor tool calls.
    EmptyResponse,
    /// The model was still requesting tools when the cap was reached.
    IterationLimit,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Final => "final",
            Termination::EmptyResponse => "empty_response",
            Termination::IterationLimit => "iteration_limit",
        }
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One dispatched tool call, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCallRecord {
    pub id: String,
    pub name: String,
    pub success: bool,
}

/// Detailed outcome of one submitted message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatOutput {
    /// Final text, or one of the placeholder strings
    pub response: String,
    pub termination: Termination,
    /// Number of gateway calls made for this message
    pub iterations: usize,
    /// Every tool call dispatched, in dispatch order
    pub tool_calls: Vec<ToolCallRecord>,
}
