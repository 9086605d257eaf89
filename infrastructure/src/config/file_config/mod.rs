//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Every section uses
//! `#[serde(default)]`, so a partial file only overrides what it names.

mod agent;
mod logging;
mod providers;
mod tools;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use providers::{FileOpenAiConfig, FileProvidersConfig};
pub use tools::{FileToolsConfig, FileWeatherConfig};

use serde::{Deserialize, Serialize};
use toolchat_application::ChatConfig;
use toolchat_domain::config::{ConfigIssue, ConfigIssueCode};

use crate::tools::WeatherProvider;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Conversation loop settings
    pub agent: FileAgentConfig,
    /// Model provider settings
    pub providers: FileProvidersConfig,
    /// Built-in tool settings
    pub tools: FileToolsConfig,
    /// Diagnostic and conversation logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.agent.to_chat_config().1;

        if self.providers.openai.model.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "providers.openai.model".to_string(),
                },
                "providers.openai.model is empty, the server default model will be requested",
            ));
        }

        if self.providers.openai.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "providers.openai.base_url".to_string(),
                },
                "providers.openai.base_url is empty",
            ));
        }

        let provider = &self.tools.weather.provider;
        if provider.parse::<WeatherProvider>().is_err() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: "tools.weather.provider".to_string(),
                    value: provider.clone(),
                    valid_values: WeatherProvider::NAMES.iter().map(|s| s.to_string()).collect(),
                },
                format!(
                    "Unknown weather provider '{}', get_weather will fail when an API key is set",
                    provider
                ),
            ));
        }

        issues
    }

    /// Loop settings derived from the `[agent]` section.
    pub fn to_chat_config(&self) -> ChatConfig {
        self.agent.to_chat_config().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use toolchat_domain::config::Severity;

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.to_chat_config(), ChatConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[agent]
max_iterations = 8
model_timeout_seconds = 90
parallel_tool_calls = false

[providers.openai]
base_url = "http://localhost:11434"
model = "qwen2.5"
timeout_seconds = 120

[tools.weather]
provider = "visualcrossing"
api_key_env = "VC_KEY"

[logging]
conversation_log = "chat.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.agent.max_iterations, 8);
        assert_eq!(config.providers.openai.model, "qwen2.5");
        assert_eq!(config.providers.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.tools.weather.provider, "visualcrossing");
        assert_eq!(config.tools.weather.timeout_seconds, 10);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some(std::path::Path::new("chat.jsonl"))
        );
        assert!(config.logging.file.is_none());

        let chat = config.to_chat_config();
        assert_eq!(chat.max_iterations, 8);
        assert_eq!(chat.model_timeout, Some(Duration::from_secs(90)));
        assert!(!chat.parallel_tool_calls);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FileConfig = toml::from_str("[agent]\nmax_iterations = 3\n").unwrap();

        assert_eq!(config.agent.max_iterations, 3);
        assert!(config.agent.parallel_tool_calls);
        assert_eq!(config.providers, FileProvidersConfig::default());
        assert_eq!(config.tools, FileToolsConfig::default());
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let toml_str = r#"
[agent]
max_iterations = 0

[providers.openai]
model = ""

[tools.weather]
provider = "darksky"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();

        let issues = config.validate();

        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 1);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::InvalidEnumValue { value, valid_values, .. }
                if value == "darksky" && valid_values.len() == 3
        )));
        assert!(issues.iter().any(|i| i.severity == Severity::Warning
            && matches!(&i.code, ConfigIssueCode::EmptyValue { field } if field == "providers.openai.model")));

        assert_eq!(config.to_chat_config().max_iterations, 5);
    }
}
