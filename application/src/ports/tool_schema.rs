//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to serialize them for an
//! API" (infrastructure). The domain layer defines [`ToolDescriptor`] with a
//! typed parameter list; this port handles the JSON Schema rendering the
//! model APIs and the tool listing require.

use toolchat_domain::tool::ToolDescriptor;

/// Port for converting tool descriptors to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// JSON Schema object describing the tool's arguments.
    fn input_schema(&self, tool: &ToolDescriptor) -> serde_json::Value;

    /// Provider-neutral tool object: `{name, description, input_schema}`.
    fn tool_to_schema(&self, tool: &ToolDescriptor) -> serde_json::Value;

    /// Convert all tools, preserving the given order.
    fn all_tools_schema(&self, tools: &[ToolDescriptor]) -> Vec<serde_json::Value> {
        tools.iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
