//! Tool Registry
//!
//! The [`ToolRegistry`] holds every registered [`Tool`] and implements
//! [`ToolExecutorPort`]. It answers listing queries, dispatches calls by
//! name, and is the fault-containment wall: whatever happens inside a tool
//! (an error, a panic, a timeout) comes back as a failed
//! [`ToolResultEnvelope`].
//!
//! # Usage
//!
//! ```ignore
//! use toolchat_infrastructure::tools::{CalculatorTool, ReadFileTool, ToolRegistry};
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(CalculatorTool::new())?;
//! registry.register(ReadFileTool::new())?;
//!
//! let names: Vec<&str> = registry.list().iter().map(|d| d.name.as_str()).collect();
//! assert_eq!(names, ["calculator", "read_file"]);
//! ```
//!
//! # Name Resolution
//!
//! Names are unique. Registering a second tool under an existing name fails
//! with [`RegistryError::DuplicateName`] and the first registration stays.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use toolchat_application::ports::tool_executor::ToolExecutorPort;
use toolchat_domain::tool::{
    Arguments, RegistryError, Tool, ToolDescriptor, ToolError, ToolResultEnvelope,
};

use super::weather::{WeatherSettings, WeatherTool};
use super::{CalculatorTool, ReadFileTool};

/// Tool registry keyed by name, in registration order
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry preloaded with calculator, get_weather and read_file
    pub fn with_default_tools(weather: WeatherSettings) -> Self {
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(CalculatorTool::new()),
            Arc::new(WeatherTool::new(weather)),
            Arc::new(ReadFileTool::new()),
        ];
        Self { tools }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool (Arc version)
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        if self.get(tool.name()).is_some() {
            tracing::warn!(tool = %tool.name(), "Duplicate tool registration rejected");
            return Err(RegistryError::DuplicateName(tool.name().to_string()));
        }
        tracing::debug!(tool = %tool.name(), "Registered tool");
        self.tools.push(tool);
        Ok(())
    }

    /// Descriptors in registration order
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call by name. Never fails; see module docs.
    pub async fn invoke(&self, name: &str, arguments: &Arguments) -> ToolResultEnvelope {
        let Some(tool) = self.get(name) else {
            tracing::warn!(tool = %name, "Tool not found");
            return ToolResultEnvelope::from_error(&ToolError::not_found(name));
        };

        tracing::debug!(tool = %name, "Executing tool");

        let execution = AssertUnwindSafe(tool.execute(arguments)).catch_unwind();
        let outcome = match tool.timeout() {
            Some(limit) => match tokio::time::timeout(limit, execution).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    let error = ToolError::Timeout {
                        tool: name.to_string(),
                        seconds: limit.as_secs(),
                    };
                    tracing::warn!(tool = %name, error = %error, "Tool timed out");
                    return ToolResultEnvelope::from_error(&error);
                }
            },
            None => execution.await,
        };

        match outcome {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(error)) => {
                tracing::debug!(tool = %name, code = error.code(), error = %error, "Tool failed");
                ToolResultEnvelope::from_error(&error)
            }
            Err(panic) => {
                let error = ToolError::fault(panic_message(panic.as_ref()));
                tracing::warn!(tool = %name, error = %error, "Tool panicked");
                ToolResultEnvelope::from_error(&error)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.list()
    }

    async fn invoke(&self, name: &str, arguments: &Arguments) -> ToolResultEnvelope {
        ToolRegistry::invoke(self, name, arguments).await
    }
}
