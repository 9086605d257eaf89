//! Chat parameters for the tool loop.
//!
//! [`ChatConfig`] groups the static parameters that control the tool loop in
//! [`ConversationOrchestrator`](crate::use_cases::chat::ConversationOrchestrator).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cap on model round trips per submitted message.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Tool loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of gateway calls for one submitted message.
    pub max_iterations: usize,
    /// Deadline for a single gateway call. `None` waits indefinitely.
    pub model_timeout: Option<Duration>,
    /// Run sibling tool calls of one assistant turn concurrently.
    pub parallel_tool_calls: bool,
    /// Replaces the generated system prompt when set.
    pub system_prompt: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            model_timeout: None,
            parallel_tool_calls: true,
            system_prompt: None,
        }
    }
}

impl ChatConfig {
    // ==================== Builder Methods ====================

    /// Values below 1 are raised to 1 so every message reaches the model.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    pub fn with_model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = parallel;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ChatConfig::default();
        assert_eq!(config.max_iterations, 5);
        assert!(config.model_timeout.is_none());
        assert!(config.parallel_tool_calls);
        assert!(config.system_prompt.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = ChatConfig::default()
            .with_max_iterations(3)
            .with_model_timeout(Some(Duration::from_secs(30)))
            .with_parallel_tool_calls(false)
            .with_system_prompt("Be brief.");

        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.model_timeout, Some(Duration::from_secs(30)));
        assert!(!config.parallel_tool_calls);
        assert_eq!(config.system_prompt.as_deref(), Some("Be brief."));
    }

    #[test]
    fn test_zero_iterations_clamped() {
        let config = ChatConfig::default().with_max_iterations(0);
        assert_eq!(config.max_iterations, 1);
    }
}
