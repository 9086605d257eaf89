//! Application-level configuration.
//!
//! - [`ChatConfig`]: tool loop control (iteration cap, timeouts, dispatch mode)

pub mod chat_config;

pub use chat_config::ChatConfig;
