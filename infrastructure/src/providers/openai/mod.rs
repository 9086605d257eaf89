//! OpenAI-compatible Chat Completions gateway
//!
//! Works against any server exposing `POST {base_url}/v1/chat/completions`
//! with function calling.

mod convert;
mod gateway;
mod types;

pub use gateway::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiGateway, OpenAiSettings};
