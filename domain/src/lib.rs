//! Domain layer for toolchat
//!
//! This crate contains the core entities and value objects of the
//! tool-calling conversation. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A [`Tool`] is a named capability with a declared parameter schema
//! ([`ToolDescriptor`]). The model asks for it through a [`ToolCallRequest`]
//! and every execution yields a [`ToolResultEnvelope`].
//!
//! ## Conversation
//!
//! The [`ConversationHistory`] is the ordered sequence of
//! [`ConversationTurn`]s (system, user, assistant, tool result) that is
//! replayed to the model on every round trip.

pub mod config;
pub mod conversation;
pub mod prompt;
pub mod tool;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use conversation::{
    entities::{ConversationHistory, ConversationTurn, CorrelationError, Role},
    response::{ContentBlock, LlmResponse, StopReason},
};
pub use prompt::PromptTemplate;
pub use tool::{
    entities::{Arguments, ParamType, ToolCallRequest, ToolDescriptor, ToolParameter},
    traits::{ArgumentValidator, DefaultArgumentValidator, Tool},
    value_objects::{RegistryError, ToolError, ToolResultEnvelope},
};
