//! Prompt domain
//!
//! The system prompt that seeds every new conversation.

mod template;

pub use template::PromptTemplate;
