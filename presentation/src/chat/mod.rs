//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface around one
//! conversation.

mod repl;

pub use repl::ChatRepl;
