//! Tool configuration from TOML (`[tools]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::providers::resolve_key;
use crate::tools::{WeatherProvider, WeatherSettings};

/// Weather tool configuration (`[tools.weather]`)
///
/// ```toml
/// [tools.weather]
/// provider = "weatherapi"       # openweathermap | weatherapi | visualcrossing
/// api_key_env = "WEATHER_API_KEY"
/// timeout_seconds = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWeatherConfig {
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub provider: String,
    pub timeout_seconds: u64,
}

impl Default for FileWeatherConfig {
    fn default() -> Self {
        Self {
            api_key_env: "WEATHER_API_KEY".to_string(),
            api_key: None,
            provider: WeatherProvider::OpenWeatherMap.as_str().to_string(),
            timeout_seconds: 10,
        }
    }
}

impl FileWeatherConfig {
    /// Runtime settings, with the API key resolved from the environment.
    pub fn to_settings(&self) -> WeatherSettings {
        self.to_settings_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn to_settings_with(&self, lookup: impl Fn(&str) -> Option<String>) -> WeatherSettings {
        WeatherSettings {
            api_key: resolve_key(self.api_key.as_deref(), &self.api_key_env, lookup),
            provider: self.provider.clone(),
            timeout: Duration::from_secs(self.timeout_seconds.max(1)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub weather: FileWeatherConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_without_env() {
        let settings = FileWeatherConfig::default().to_settings_with(|_| None);
        assert_eq!(settings, WeatherSettings::default());
    }

    #[test]
    fn test_env_key_resolved() {
        let config = FileWeatherConfig {
            provider: "weatherapi".to_string(),
            timeout_seconds: 3,
            ..Default::default()
        };

        let settings = config.to_settings_with(|name| {
            (name == "WEATHER_API_KEY").then(|| "wk".to_string())
        });

        assert_eq!(settings.api_key.as_deref(), Some("wk"));
        assert_eq!(settings.provider, "weatherapi");
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }
}
