//! Tool domain value objects: result envelopes and error types
//!
//! Every dispatch produces a [`ToolResultEnvelope`]. Failures are described
//! by [`ToolError`] variants and flattened into the envelope's `error`
//! string, so tool-level faults travel as data rather than as errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure of a single tool call.
///
/// | Variant | Raised by |
/// |---------|-----------|
/// | `NotFound` | Registry, when no tool carries the requested name |
/// | `InvalidArguments` | Argument parsing or schema validation |
/// | `ExecutionFailed` | The tool itself (division by zero, unknown file, HTTP error) |
/// | `Fault` | Registry, when a tool errors unexpectedly or panics |
/// | `Timeout` | Registry, when a tool exceeds its time budget |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Tool not found: {name}")]
    NotFound { name: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    ExecutionFailed(String),

    #[error("Tool execution fault: {0}")]
    Fault(String),

    #[error("Tool '{tool}' timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::ExecutionFailed(message.into())
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault(message.into())
    }

    /// Short machine-readable code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::NotFound { .. } => "NOT_FOUND",
            ToolError::InvalidArguments(_) => "INVALID_ARGUMENT",
            ToolError::ExecutionFailed(_) => "EXECUTION_FAILED",
            ToolError::Fault(_) => "FAULT",
            ToolError::Timeout { .. } => "TIMEOUT",
        }
    }
}

/// Registration-time failure. Fatal to startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("A tool named '{0}' is already registered")]
    DuplicateName(String),
}

/// Uniform wrapper around the outcome of a tool execution.
///
/// Exactly one of `data` / `error` is populated: `data` iff `success`.
/// Only the populated field is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResultEnvelope {
    /// Create a successful envelope carrying `data`
    pub fn success(data: impl Into<Value>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    /// Create a failed envelope with a plain message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Create a failed envelope describing `error`
    pub fn from_error(error: &ToolError) -> Self {
        Self::failure(error.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// JSON text handed back to the model as the tool result content
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"error":"unserializable tool result: {e}"}}"#)
        })
    }
}

impl From<ToolError> for ToolResultEnvelope {
    fn from(error: ToolError) -> Self {
        Self::from_error(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let envelope = ToolResultEnvelope::success(json!({"result": 5.0}));

        assert!(envelope.is_success());
        assert_eq!(envelope.data().unwrap()["result"], 5.0);
        assert!(envelope.error().is_none());
    }

    #[test]
    fn test_failure_envelope_from_error() {
        let envelope: ToolResultEnvelope = ToolError::not_found("teleport").into();

        assert!(!envelope.is_success());
        assert!(envelope.data().is_none());
        assert_eq!(envelope.error(), Some("Tool not found: teleport"));
    }

    #[test]
    fn test_serialization_omits_empty_side() {
        let ok = ToolResultEnvelope::success(json!(1)).to_json_string();
        assert_eq!(ok, r#"{"success":true,"data":1}"#);

        let err = ToolResultEnvelope::failure("Division by zero").to_json_string();
        assert_eq!(err, r#"{"success":false,"error":"Division by zero"}"#);
    }

    #[test]
    fn test_error_codes_and_messages() {
        let timeout = ToolError::Timeout {
            tool: "get_weather".to_string(),
            seconds: 10,
        };
        assert_eq!(timeout.code(), "TIMEOUT");
        assert_eq!(timeout.to_string(), "Tool 'get_weather' timed out after 10s");

        assert_eq!(ToolError::execution_failed("boom").to_string(), "boom");
        assert_eq!(
            RegistryError::DuplicateName("calculator".into()).to_string(),
            "A tool named 'calculator' is already registered"
        );
    }
}
