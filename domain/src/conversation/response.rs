//! Model response types.
//!
//! A model reply is an ordered list of content blocks mixing text and tool
//! use requests. The orchestrator only looks at two things: the
//! concatenated text and the tool calls. Text present alongside tool calls
//! is kept in history but never ends the loop.

use crate::tool::entities::ToolCallRequest;
use serde::{Deserialize, Serialize};

/// A single block of content within a model response.
///
/// # Examples
///
/// ```
/// use toolchat_domain::conversation::response::ContentBlock;
///
/// let text = ContentBlock::Text {
///     text: "Let me check the weather.".to_string(),
/// };
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_abc123".to_string(),
///     name: "get_weather".to_string(),
///     arguments: r#"{"city":"Paris"}"#.to_string(),
/// };
/// assert!(tool.as_tool_use().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text { text: String },

    /// A tool use request from the model.
    ToolUse {
        /// Provider-assigned id for correlating with the tool result.
        id: String,
        /// Tool name as requested by the model.
        name: String,
        /// Raw JSON argument object as produced by the model.
        arguments: String,
    },
}

impl ContentBlock {
    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns `(id, name, arguments)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &str)> {
        match self {
            ContentBlock::ToolUse {
                id,
                name,
                arguments,
            } => Some((id, name, arguments)),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants to call tools.
    ToolUse,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A structured reply from the model gateway.
///
/// # Examples
///
/// ```
/// use toolchat_domain::conversation::response::{ContentBlock, LlmResponse, StopReason};
///
/// let response = LlmResponse::from_text("It is 18°C in Paris.");
/// assert!(!response.has_tool_calls());
///
/// let response = LlmResponse {
///     content: vec![ContentBlock::ToolUse {
///         id: "call_1".to_string(),
///         name: "calculator".to_string(),
///         arguments: r#"{"operation":"add","a":2,"b":3}"#.to_string(),
///     }],
///     stop_reason: Some(StopReason::ToolUse),
///     model: Some("gpt-4o".to_string()),
/// };
/// assert_eq!(response.tool_calls().len(), 1);
/// assert_eq!(response.text(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Create a response that only requests tools.
    pub fn from_tool_calls(calls: impl IntoIterator<Item = ToolCallRequest>) -> Self {
        Self {
            content: calls
                .into_iter()
                .map(|c| ContentBlock::ToolUse {
                    id: c.id,
                    name: c.name,
                    arguments: c.arguments,
                })
                .collect(),
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Text content, or `None` when the response carries no text at all.
    pub fn text(&self) -> Option<String> {
        let text = self.text_content();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Extract all `ToolUse` content blocks as requests, in order.
    pub fn tool_calls(&self) -> Vec<ToolCallRequest> {
        self.content
            .iter()
            .filter_map(|b| {
                b.as_tool_use()
                    .map(|(id, name, arguments)| ToolCallRequest::new(id, name, arguments))
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_blocks_serialize_with_type_tag() {
        let blocks = vec![
            ContentBlock::Text {
                text: "Checking.".to_string(),
            },
            ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "calculator".to_string(),
                arguments: "{}".to_string(),
            },
        ];

        let value = serde_json::to_value(&blocks).unwrap();
        assert_eq!(value[0]["type"], "text");
        assert_eq!(value[0]["text"], "Checking.");
        assert_eq!(value[1]["type"], "tool_use");
        assert_eq!(value[1]["name"], "calculator");

        let back: Vec<ContentBlock> = serde_json::from_value(value).unwrap();
        assert_eq!(back, blocks);
    }

    #[test]
    fn from_text_creates_text_only_response() {
        let response = LlmResponse::from_text("Hello, world!");
        assert_eq!(response.text_content(), "Hello, world!");
        assert!(!response.has_tool_calls());
        assert!(response.tool_calls().is_empty());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn tool_calls_extraction_keeps_order_and_text() {
        let response = LlmResponse {
            content: vec![
                ContentBlock::Text {
                    text: "Checking both cities.".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "get_weather".to_string(),
                    arguments: r#"{"city":"Paris"}"#.to_string(),
                },
                ContentBlock::ToolUse {
                    id: "call_2".to_string(),
                    name: "get_weather".to_string(),
                    arguments: r#"{"city":"Berlin"}"#.to_string(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        };

        assert!(response.has_tool_calls());
        assert_eq!(response.text().as_deref(), Some("Checking both cities."));

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[1].id, "call_2");
        assert_eq!(calls[1].parse_arguments().unwrap()["city"], "Berlin");
    }

    #[test]
    fn empty_response() {
        let response = LlmResponse {
            content: vec![],
            stop_reason: None,
            model: None,
        };

        assert_eq!(response.text(), None);
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn from_tool_calls_round_trips_requests() {
        let call = ToolCallRequest::new("call_9", "read_file", r#"{"path":"data.txt"}"#);
        let response = LlmResponse::from_tool_calls([call.clone()]);
        assert_eq!(response.tool_calls(), vec![call]);
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
    }
}
