//! [`ModelGateway`] adapter for OpenAI-compatible servers.

use std::time::Duration;

use async_trait::async_trait;
use toolchat_application::ports::model_gateway::{CompletionRequest, GatewayError, ModelGateway};
use toolchat_domain::LlmResponse;
use tracing::{debug, trace, warn};

use super::convert;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub api_key: String,
    /// Scheme and host, without the `/v1/...` path
    pub base_url: String,
    pub model: String,
    /// Whole-request timeout enforced by the HTTP client
    pub timeout: Duration,
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/v1/chat/completions", base)
    }
}

/// Gateway that sends the whole history to `/v1/chat/completions` on every call.
pub struct OpenAiGateway {
    settings: OpenAiSettings,
    client: reqwest::Client,
}

impl OpenAiGateway {
    /// Fails when the API key is empty or the HTTP client cannot be built.
    pub fn new(settings: OpenAiSettings) -> Result<Self, GatewayError> {
        if settings.api_key.trim().is_empty() {
            return Err(GatewayError::Authentication(
                "No API key configured. Set OPENAI_API_KEY or providers.openai.api_key".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<LlmResponse, GatewayError> {
        let body = convert::build_request(&self.settings.model, request.history, request.tools);
        debug!(
            model = %self.settings.model,
            messages = body.messages.len(),
            tools = request.tools.len(),
            "Sending chat completion request"
        );
        trace!(body = %convert::request_to_value(&body), "Request body");

        let response = self
            .client
            .post(self.settings.completions_url())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::ConnectionError(format!("Failed to read response body: {}", e))
            }
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Chat completion request failed");
            return Err(convert::convert_error(status.as_u16(), &text));
        }

        let response = convert::parse_response(&text)?;
        debug!(
            tool_calls = response.tool_calls().len(),
            stop_reason = ?response.stop_reason,
            "Received chat completion"
        );
        Ok(response)
    }
}
