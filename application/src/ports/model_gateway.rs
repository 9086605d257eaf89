//! Model Gateway port
//!
//! Defines the interface for asking a language model for the next turn.

use async_trait::async_trait;
use thiserror::Error;
use toolchat_domain::{ConversationTurn, LlmResponse, ToolDescriptor};

/// Errors that can occur during model gateway operations.
///
/// None of these is recoverable inside the tool loop: a gateway failure
/// aborts the current message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// One completion request: the full history plus the tools on offer.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub history: &'a [ConversationTurn],
    pub tools: &'a [ToolDescriptor],
}

impl<'a> CompletionRequest<'a> {
    pub fn new(history: &'a [ConversationTurn], tools: &'a [ToolDescriptor]) -> Self {
        Self { history, tools }
    }
}

/// Gateway for model inference
///
/// Given the conversation so far and the available tools, returns one
/// assistant reply: optional text and zero or more tool calls with unique
/// correlation ids. Implementations (adapters) live in the infrastructure
/// layer.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Identifier of the model behind this gateway (for logs)
    fn model(&self) -> &str;

    /// Request the next assistant turn
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<LlmResponse, GatewayError>;
}
