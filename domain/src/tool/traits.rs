//! Tool domain traits
//!
//! [`Tool`] is the capability interface every tool implements. The
//! [`ArgumentValidator`] is pure domain logic that checks a call's arguments
//! against the tool's declared parameters before execution.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::entities::{Arguments, ParamType, ToolDescriptor};
use super::value_objects::{ToolError, ToolResultEnvelope};

/// A named capability the model can invoke.
///
/// Implementations validate their own arguments and report failures as
/// `Err(ToolError)`; the registry flattens every error into an envelope
/// with `success = false`, so nothing a tool does escapes as an error.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Descriptor presented to the model
    fn descriptor(&self) -> &ToolDescriptor;

    /// Execute the tool with parsed arguments
    async fn execute(&self, arguments: &Arguments) -> Result<ToolResultEnvelope, ToolError>;

    /// Upper bound on a single execution (None = unbounded)
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Convenience accessor for the tool name
    fn name(&self) -> &str {
        &self.descriptor().name
    }
}

/// Validator for tool arguments
pub trait ArgumentValidator {
    /// Validate arguments against a descriptor
    fn validate(&self, arguments: &Arguments, descriptor: &ToolDescriptor) -> Result<(), ToolError>;
}

/// Default implementation of [`ArgumentValidator`].
///
/// Checks that required parameters are present and non-null, that values
/// have a compatible JSON type (numeric strings are accepted for numbers),
/// and that enumerated parameters carry one of their allowed values.
/// Unknown arguments are ignored.
#[derive(Debug, Clone, Default)]
pub struct DefaultArgumentValidator;

impl ArgumentValidator for DefaultArgumentValidator {
    fn validate(&self, arguments: &Arguments, descriptor: &ToolDescriptor) -> Result<(), ToolError> {
        for param in &descriptor.parameters {
            let value = match arguments.get(&param.name) {
                Some(Value::Null) | None => {
                    if param.required {
                        return Err(ToolError::invalid_arguments(format!(
                            "Missing required parameter '{}' for tool '{}'",
                            param.name, descriptor.name
                        )));
                    }
                    continue;
                }
                Some(v) => v,
            };

            if !type_matches(param.param_type, value) {
                return Err(ToolError::invalid_arguments(format!(
                    "Parameter '{}' for tool '{}' must be a {}",
                    param.name, descriptor.name, param.param_type
                )));
            }

            if !param.allowed_values.is_empty() {
                let allowed = value
                    .as_str()
                    .is_some_and(|s| param.allowed_values.iter().any(|a| a == s));
                if !allowed {
                    return Err(ToolError::invalid_arguments(format!(
                        "Parameter '{}' for tool '{}' must be one of: {}",
                        param.name,
                        descriptor.name,
                        param.allowed_values.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }
}

fn type_matches(param_type: ParamType, value: &Value) -> bool {
    match param_type {
        ParamType::String => value.is_string(),
        ParamType::Number => {
            value.is_number() || value.as_str().is_some_and(|s| s.trim().parse::<f64>().is_ok())
        }
        ParamType::Integer => {
            value.is_i64()
                || value.is_u64()
                || value.as_str().is_some_and(|s| s.trim().parse::<i64>().is_ok())
        }
        ParamType::Boolean => value.is_boolean(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;
    use serde_json::json;

    fn calculator() -> ToolDescriptor {
        ToolDescriptor::new("calculator", "Arithmetic")
            .with_parameter(
                ToolParameter::new("operation", "Operation", true)
                    .with_allowed_values(["add", "subtract", "multiply", "divide"]),
            )
            .with_parameter(ToolParameter::new("a", "First", true).with_type(ParamType::Number))
            .with_parameter(ToolParameter::new("b", "Second", true).with_type(ParamType::Number))
    }

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_validator_missing_required() {
        let result = DefaultArgumentValidator
            .validate(&args(json!({"operation": "add", "a": 1})), &calculator());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Missing required parameter 'b'"));
    }

    #[test]
    fn test_validator_null_counts_as_missing() {
        let result = DefaultArgumentValidator.validate(
            &args(json!({"operation": "add", "a": 1, "b": null})),
            &calculator(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validator_enum_violation() {
        let result = DefaultArgumentValidator.validate(
            &args(json!({"operation": "modulo", "a": 1, "b": 2})),
            &calculator(),
        );
        assert!(result.unwrap_err().to_string().contains("must be one of"));
    }

    #[test]
    fn test_validator_type_mismatch() {
        let result = DefaultArgumentValidator.validate(
            &args(json!({"operation": "add", "a": "ten", "b": 2})),
            &calculator(),
        );
        assert!(result.unwrap_err().to_string().contains("must be a number"));
    }

    #[test]
    fn test_validator_accepts_numeric_strings_and_extra_args() {
        let result = DefaultArgumentValidator.validate(
            &args(json!({"operation": "add", "a": "2.5", "b": 3, "note": "extra"})),
            &calculator(),
        );
        assert!(result.is_ok());
    }
}
