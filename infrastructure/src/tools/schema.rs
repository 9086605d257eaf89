//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that renders a tool's typed
//! parameter list as a provider-neutral JSON Schema object.

use serde_json::{Map, Value, json};
use toolchat_application::ports::tool_schema::ToolSchemaPort;
use toolchat_domain::tool::ToolDescriptor;

/// Default implementation producing provider-neutral JSON Schema.
///
/// Each parameter becomes a property with its `type` and `description`,
/// plus `enum` when the parameter has allowed values and `default` when it
/// declares one. Tool order is preserved.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn input_schema(&self, tool: &ToolDescriptor) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.param_type.as_str()));
            prop.insert("description".to_string(), json!(param.description));
            if !param.allowed_values.is_empty() {
                prop.insert("enum".to_string(), json!(param.allowed_values));
            }
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn tool_to_schema(&self, tool: &ToolDescriptor) -> Value {
        json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": self.input_schema(tool),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolchat_domain::tool::{ParamType, ToolParameter};

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDescriptor::new("get_weather", "Current weather")
            .with_parameter(ToolParameter::new("city", "City name", true))
            .with_parameter(
                ToolParameter::new("units", "Temperature units", false)
                    .with_allowed_values(["celsius", "fahrenheit"])
                    .with_default("celsius"),
            )
            .with_parameter(
                ToolParameter::new("days", "Forecast days", false).with_type(ParamType::Integer),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "get_weather");
        assert_eq!(schema["description"], "Current weather");
        assert_eq!(schema["input_schema"]["type"], "object");

        let city = &schema["input_schema"]["properties"]["city"];
        assert_eq!(city["type"], "string");
        assert_eq!(city["description"], "City name");
        assert!(city.get("enum").is_none());

        let units = &schema["input_schema"]["properties"]["units"];
        assert_eq!(units["enum"], json!(["celsius", "fahrenheit"]));
        assert_eq!(units["default"], "celsius");

        let days = &schema["input_schema"]["properties"]["days"];
        assert_eq!(days["type"], "integer");

        assert_eq!(schema["input_schema"]["required"], json!(["city"]));
    }

    #[test]
    fn test_no_parameters() {
        let converter = JsonSchemaToolConverter;
        let schema = converter.input_schema(&ToolDescriptor::new("ping", "Ping"));

        assert_eq!(schema, json!({"type": "object", "properties": {}, "required": []}));
    }

    #[test]
    fn test_all_tools_schema_keeps_order() {
        let converter = JsonSchemaToolConverter;
        let tools = vec![
            ToolDescriptor::new("read_file", "Read file"),
            ToolDescriptor::new("calculator", "Arithmetic"),
        ];

        let schemas = converter.all_tools_schema(&tools);
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0]["name"], "read_file");
        assert_eq!(schemas[1]["name"], "calculator");
    }
}
