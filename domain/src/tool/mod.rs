//! Tool domain module
//!
//! This module defines the core abstractions of the **Tool System**: how the
//! model reaches capabilities outside text generation through one uniform
//! interface.
//!
//! ```text
//! ┌────────────────┐    ┌─────────────────┐    ┌────────────────────┐
//! │ ToolDescriptor │───▶│ ToolCallRequest │───▶│ ToolResultEnvelope │
//! │ (schema)       │    │ (invocation)    │    │ (outcome)          │
//! └────────────────┘    └─────────────────┘    └────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Tool`]: capability interface (descriptor + async execute)
//! - [`ToolDescriptor`]: name, description and parameter schema
//! - [`ToolCallRequest`]: a model-issued invocation carrying a correlation id
//! - [`ToolResultEnvelope`]: success/error wrapper every dispatch produces
//! - [`ToolError`]: tagged failure variants, flattened into envelopes
//! - [`ArgumentValidator`]: pure argument validation against a descriptor
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): port used by the orchestrator
//! - **Infrastructure** (`ToolRegistry`, concrete tools): dispatch, fault
//!   containment, HTTP

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{Arguments, ParamType, ToolCallRequest, ToolDescriptor, ToolParameter};
pub use traits::{ArgumentValidator, DefaultArgumentValidator, Tool};
pub use value_objects::{RegistryError, ToolError, ToolResultEnvelope};
