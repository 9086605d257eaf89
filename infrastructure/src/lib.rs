//! Infrastructure layer for toolchat
//!
//! Adapters for the application ports: the tool registry and built-in
//! tools, the OpenAI-compatible model gateway, the JSONL conversation
//! logger, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::{OpenAiGateway, OpenAiSettings};
pub use tools::{
    CalculatorTool, JsonSchemaToolConverter, ReadFileTool, ToolRegistry, WeatherProvider,
    WeatherSettings, WeatherTool,
};
