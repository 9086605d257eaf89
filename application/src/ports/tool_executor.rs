//! Tool Executor port
//!
//! Defines the interface the orchestrator uses to list and dispatch tools.

use async_trait::async_trait;
use toolchat_domain::tool::{Arguments, ToolDescriptor, ToolResultEnvelope};

/// Port for tool dispatch
///
/// `invoke` never fails: unknown names, invalid arguments, faults and
/// timeouts all come back as envelopes with `success = false`.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Descriptors of all available tools, in registration order
    fn descriptors(&self) -> Vec<&ToolDescriptor>;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.descriptors().iter().any(|d| d.name == name)
    }

    /// Names of all available tools, in registration order
    fn tool_names(&self) -> Vec<&str> {
        self.descriptors().into_iter().map(|d| d.name.as_str()).collect()
    }

    /// Execute a tool by name
    async fn invoke(&self, name: &str, arguments: &Arguments) -> ToolResultEnvelope;
}
