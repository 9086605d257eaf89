//! Tool implementations
//!
//! Concrete [`Tool`](toolchat_domain::tool::Tool)s offered to the model,
//! the [`ToolRegistry`] that dispatches them, and the JSON Schema converter.
//!
//! ## Built-in Tools
//!
//! - `calculator`: arithmetic on two operands
//! - `get_weather`: current weather over HTTP, mock data without an API key
//! - `read_file`: reads from a fixed in-memory filesystem

pub mod calculator;
pub mod file;
pub mod schema;
pub mod weather;

mod registry;

pub use calculator::CalculatorTool;
pub use file::ReadFileTool;
pub use registry::ToolRegistry;
pub use schema::JsonSchemaToolConverter;
pub use weather::{WeatherProvider, WeatherSettings, WeatherTool};
