//! Conversation domain.
//!
//! - [`entities::ConversationTurn`]: one system, user, assistant or tool-result entry
//! - [`entities::ConversationHistory`]: the ordered, append-only turn sequence
//! - [`response::LlmResponse`]: a model reply (text and/or tool calls)

pub mod entities;
pub mod response;

pub use entities::{ConversationHistory, ConversationTurn, CorrelationError, Role};
pub use response::{ContentBlock, LlmResponse, StopReason};
