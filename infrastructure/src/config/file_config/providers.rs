//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::providers::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiSettings};

/// OpenAI-compatible provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL, without the `/v1/...` path.
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// HTTP timeout per request.
    pub timeout_seconds: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileOpenAiConfig {
    /// Resolve the API key: explicit `api_key` first, then the `api_key_env` variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env, lookup)
    }

    /// Gateway settings for the given key.
    pub fn to_settings(&self, api_key: impl Into<String>) -> OpenAiSettings {
        OpenAiSettings::new(api_key)
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_timeout(Duration::from_secs(self.timeout_seconds.max(1)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
}

pub(crate) fn resolve_key(
    explicit: Option<&str>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| lookup(env_name))
        .filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let config = FileOpenAiConfig {
            api_key: Some("sk-file".to_string()),
            ..Default::default()
        };
        let key = config.resolve_api_key_with(|_| Some("sk-env".to_string()));
        assert_eq!(key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn test_env_key_lookup_uses_configured_name() {
        let config = FileOpenAiConfig {
            api_key_env: "MY_KEY".to_string(),
            ..Default::default()
        };
        let key = config.resolve_api_key_with(|name| (name == "MY_KEY").then(|| "sk-env".to_string()));
        assert_eq!(key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_blank_key_is_none() {
        let config = FileOpenAiConfig::default();
        assert!(config.resolve_api_key_with(|_| Some("  ".to_string())).is_none());
        assert!(config.resolve_api_key_with(|_| None).is_none());
    }

    #[test]
    fn test_to_settings() {
        let config = FileOpenAiConfig {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout_seconds: 30,
            ..Default::default()
        };

        let settings = config.to_settings("sk");
        assert_eq!(settings.api_key, "sk");
        assert_eq!(settings.model, "llama3.1");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(
            settings.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
