//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value_objects::ToolError;

/// Parsed tool arguments: argument name → value.
pub type Arguments = Map<String, Value>;

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// JSON type of the parameter
    pub param_type: ParamType,
    /// Allowed values for enumerated string parameters (empty = unconstrained)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Value assumed when the argument is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            allowed_values: Vec::new(),
            default: None,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Description of a tool as presented to the model.
///
/// The name is the stable identifier used for dispatch, the description is
/// what the model reads when deciding whether to call the tool, and the
/// parameter list is the input schema (rendered to JSON Schema by the
/// conversion layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name of the tool (e.g., "calculator")
    pub name: String,
    /// Natural-language description consumed by the model
    pub description: String,
    /// Input schema, in declaration order
    pub parameters: Vec<ToolParameter>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

/// A model-issued request to invoke a tool.
///
/// `arguments` holds the argument object exactly as the model produced it
/// (JSON text). It is parsed on dispatch so that a malformed payload only
/// fails this one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Correlation id, unique within one model turn
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Raw JSON argument object
    pub arguments: String,
}

impl ToolCallRequest {
    /// Create a request from raw JSON argument text
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Create a request from an already structured argument value
    pub fn from_value(id: impl Into<String>, name: impl Into<String>, arguments: &Value) -> Self {
        Self::new(id, name, arguments.to_string())
    }

    /// Parse the argument payload into a name → value map.
    ///
    /// Blank payloads are treated as an empty object.
    pub fn parse_arguments(&self) -> Result<Arguments, ToolError> {
        if self.arguments.trim().is_empty() {
            return Ok(Arguments::new());
        }

        match serde_json::from_str::<Value>(&self.arguments) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ToolError::InvalidArguments(format!(
                "Arguments for '{}' must be a JSON object, got {}",
                self.name,
                json_kind(&other)
            ))),
            Err(e) => Err(ToolError::InvalidArguments(format!(
                "Could not parse arguments for '{}': {}",
                self.name, e
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_descriptor() {
        let tool = ToolDescriptor::new("read_file", "Reads content from a file")
            .with_parameter(ToolParameter::new("path", "Path to the file to read", true))
            .with_parameter(
                ToolParameter::new("encoding", "Text encoding", false)
                    .with_allowed_values(["utf-8", "latin-1"])
                    .with_default("utf-8"),
            );

        assert_eq!(tool.name, "read_file");
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.required_parameters().count(), 1);
        assert_eq!(tool.parameter("encoding").unwrap().allowed_values.len(), 2);
        assert!(tool.parameter("missing").is_none());
    }

    #[test]
    fn test_parse_arguments_object() {
        let call = ToolCallRequest::from_value(
            "call_1",
            "calculator",
            &json!({"operation": "add", "a": 2, "b": 3}),
        );
        let args = call.parse_arguments().unwrap();
        assert_eq!(args["operation"], "add");
        assert_eq!(args["a"], 2);
    }

    #[test]
    fn test_parse_arguments_blank_is_empty_object() {
        let call = ToolCallRequest::new("call_1", "read_file", "  ");
        assert!(call.parse_arguments().unwrap().is_empty());
    }

    #[test]
    fn test_parse_arguments_malformed() {
        let call = ToolCallRequest::new("call_1", "calculator", "{\"a\": 1,");
        let err = call.parse_arguments().unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("calculator"));
    }

    #[test]
    fn test_parse_arguments_not_an_object() {
        let call = ToolCallRequest::new("call_1", "calculator", "[1, 2]");
        let err = call.parse_arguments().unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
