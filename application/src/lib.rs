//! Application layer for toolchat
//!
//! This crate contains the conversation use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    model_gateway::{CompletionRequest, GatewayError, ModelGateway},
    progress::{ChatProgressNotifier, NoChatProgress},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::chat::{
    ChatError, ChatOutput, ConversationOrchestrator, ITERATION_LIMIT_TEXT, NO_RESPONSE_TEXT,
    Termination, ToolCallRecord,
};
