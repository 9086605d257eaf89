//! Agent configuration from TOML (`[agent]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolchat_application::ChatConfig;
use toolchat_application::config::chat_config::DEFAULT_MAX_ITERATIONS;
use toolchat_domain::config::{ConfigIssue, ConfigIssueCode};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_iterations = 5            # model round trips per message
/// model_timeout_seconds = 120   # optional, unbounded when absent
/// parallel_tool_calls = true
/// system_prompt = "You are a helpful assistant."   # optional override
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_iterations: usize,
    pub model_timeout_seconds: Option<u64>,
    pub parallel_tool_calls: bool,
    pub system_prompt: Option<String>,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            model_timeout_seconds: None,
            parallel_tool_calls: true,
            system_prompt: None,
        }
    }
}

impl FileAgentConfig {
    /// Convert into a [`ChatConfig`], reporting values that had to be replaced.
    pub fn to_chat_config(&self) -> (ChatConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let max_iterations = if self.max_iterations == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "agent.max_iterations".to_string(),
                    value: "0".to_string(),
                },
                format!(
                    "agent.max_iterations must be at least 1, using {}",
                    DEFAULT_MAX_ITERATIONS
                ),
            ));
            DEFAULT_MAX_ITERATIONS
        } else {
            self.max_iterations
        };

        let model_timeout = match self.model_timeout_seconds {
            Some(0) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::OutOfRange {
                        field: "agent.model_timeout_seconds".to_string(),
                        value: "0".to_string(),
                    },
                    "agent.model_timeout_seconds is 0, model calls will not be time limited",
                ));
                None
            }
            other => other.map(Duration::from_secs),
        };

        let mut config = ChatConfig::default()
            .with_max_iterations(max_iterations)
            .with_model_timeout(model_timeout)
            .with_parallel_tool_calls(self.parallel_tool_calls);
        if let Some(prompt) = self.system_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            config = config.with_system_prompt(prompt);
        }

        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolchat_domain::config::Severity;

    #[test]
    fn test_defaults_convert_cleanly() {
        let (config, issues) = FileAgentConfig::default().to_chat_config();
        assert!(issues.is_empty());
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_zero_iterations_is_error_with_fallback() {
        let agent = FileAgentConfig {
            max_iterations: 0,
            ..Default::default()
        };

        let (config, issues) = agent.to_chat_config();

        assert_eq!(config.max_iterations, 5);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::OutOfRange { field, .. } if field == "agent.max_iterations"
        ));
    }

    #[test]
    fn test_timeout_and_prompt() {
        let agent = FileAgentConfig {
            model_timeout_seconds: Some(30),
            system_prompt: Some("Be brief.".to_string()),
            parallel_tool_calls: false,
            ..Default::default()
        };

        let (config, issues) = agent.to_chat_config();

        assert!(issues.is_empty());
        assert_eq!(config.model_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.system_prompt.as_deref(), Some("Be brief."));
        assert!(!config.parallel_tool_calls);
    }

    #[test]
    fn test_blank_prompt_ignored() {
        let agent = FileAgentConfig {
            system_prompt: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(agent.to_chat_config().0.system_prompt.is_none());
    }
}
