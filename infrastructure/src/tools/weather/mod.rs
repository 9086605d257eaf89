//! Weather tool: get_weather
//!
//! Fetches current conditions from one of three HTTP providers when an API
//! key is configured, and serves clearly labelled mock data otherwise.
//!
//! # Failure Handling
//!
//! | Situation | Result |
//! |-----------|--------|
//! | No API key | Mock data (unknown city is an error) |
//! | Unknown provider name | Error listing the valid providers |
//! | HTTP 401 | "Invalid API key" error |
//! | HTTP 404 | "City not found" error with a country-code hint |
//! | Other HTTP status | `API error (status): body` |
//! | Request timeout | "timed out" error |
//! | Any other transport or parse failure | Mock data |

mod mock;
mod provider;

pub use mock::{MOCK_PROVIDER_LABEL, mock_weather};
pub use provider::WeatherProvider;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use toolchat_domain::tool::{
    ArgumentValidator, Arguments, DefaultArgumentValidator, Tool, ToolDescriptor, ToolError,
    ToolParameter, ToolResultEnvelope,
};

/// Tool name constant
pub const GET_WEATHER: &str = "get_weather";

/// Default HTTP timeout for provider requests
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Temperature units accepted by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Celsius => "celsius",
            Units::Fahrenheit => "fahrenheit",
        }
    }
}

impl FromStr for Units {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "celsius" => Ok(Units::Celsius),
            "fahrenheit" => Ok(Units::Fahrenheit),
            other => Err(ToolError::invalid_arguments(format!(
                "Unknown units '{}'. Use 'celsius' or 'fahrenheit'",
                other
            ))),
        }
    }
}

/// Runtime settings for the weather tool
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSettings {
    /// Provider API key. `None` (or empty) selects mock data.
    pub api_key: Option<String>,
    /// Provider name, validated on first real request
    pub provider: String,
    /// HTTP timeout per provider request
    pub timeout: Duration,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: WeatherProvider::OpenWeatherMap.as_str().to_string(),
            timeout: DEFAULT_WEATHER_TIMEOUT,
        }
    }
}

#[derive(Error, Debug)]
enum FetchError {
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Current weather for a city
pub struct WeatherTool {
    descriptor: ToolDescriptor,
    settings: WeatherSettings,
    /// `None` when the HTTP client could not be built; lookups then use mock data.
    client: Option<reqwest::Client>,
}

impl WeatherTool {
    pub fn new(settings: WeatherSettings) -> Self {
        let descriptor = ToolDescriptor::new(
            GET_WEATHER,
            "Gets real-time current weather for any city in the world, including \
             temperature, conditions, humidity and wind. Use this tool for every \
             question about weather or temperature.",
        )
        .with_parameter(ToolParameter::new(
            "city",
            "The city name (can include country code, e.g., 'London,UK' or 'New York,US')",
            true,
        ))
        .with_parameter(
            ToolParameter::new("units", "Temperature units", false)
                .with_allowed_values(["celsius", "fahrenheit"])
                .with_default("celsius"),
        );

        if settings.api_key.as_deref().is_none_or(str::is_empty) {
            let signup = settings
                .provider
                .parse::<WeatherProvider>()
                .unwrap_or(WeatherProvider::OpenWeatherMap)
                .signup_url();
            tracing::info!(signup = %signup, "No weather API key configured; get_weather will return mock data");
        }

        let client = match reqwest::Client::builder().timeout(settings.timeout).build() {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build weather HTTP client; get_weather will return mock data");
                None
            }
        };

        Self {
            descriptor,
            settings,
            client,
        }
    }

    pub fn settings(&self) -> &WeatherSettings {
        &self.settings
    }

    async fn fetch(
        &self,
        provider: WeatherProvider,
        api_key: &str,
        city: &str,
        units: Units,
    ) -> Result<Value, FetchError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| FetchError::Transport("HTTP client unavailable".to_string()))?;
        let response = provider
            .request(client, city, units, api_key)
            .map_err(FetchError::Transport)?
            .timeout(self.settings.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        provider.parse(&body, units).map_err(FetchError::Parse)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, arguments: &Arguments) -> Result<ToolResultEnvelope, ToolError> {
        DefaultArgumentValidator.validate(arguments, &self.descriptor)?;

        let city = arguments
            .get("city")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_arguments("'city' must be a string"))?;
        let units = match arguments.get("units").and_then(Value::as_str) {
            Some(units) => units.parse()?,
            None => Units::default(),
        };

        let Some(api_key) = self.settings.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return mock_weather(city, units).map(ToolResultEnvelope::success);
        };

        let provider: WeatherProvider = self
            .settings
            .provider
            .parse()
            .map_err(ToolError::execution_failed)?;

        tracing::debug!(provider = %provider, city = %city, "Fetching weather");

        match self.fetch(provider, api_key, city, units).await {
            Ok(report) => Ok(ToolResultEnvelope::success(report)),
            Err(FetchError::Status { status: 401, .. }) => Err(ToolError::execution_failed(
                format!(
                    "Invalid API key for {}. Please check your WEATHER_API_KEY.",
                    provider
                ),
            )),
            Err(FetchError::Status { status: 404, .. }) => {
                Err(ToolError::execution_failed(format!(
                    "City '{}' not found. Try adding country code (e.g., 'London,UK')",
                    city
                )))
            }
            Err(FetchError::Status { status, body }) => Err(ToolError::execution_failed(
                format!("API error ({}): {}", status, body),
            )),
            Err(FetchError::Timeout) => Err(ToolError::execution_failed(
                "Weather API request timed out. Please try again.",
            )),
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "Weather API failed, falling back to mock data");
                mock_weather(city, units).map(ToolResultEnvelope::success)
            }
        }
    }

    fn timeout(&self) -> Option<Duration> {
        // Leaves room for the HTTP timeout to report first
        Some(self.settings.timeout + Duration::from_secs(5))
    }
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Uppercase the first letter of every word, lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
