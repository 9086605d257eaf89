//! Conversation domain entities

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tool::entities::ToolCallRequest;
use crate::tool::value_objects::ToolResultEnvelope;

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    ToolResult,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::ToolResult => "tool_result",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ConversationTurn {
    System {
        content: String,
    },
    User {
        content: String,
    },
    /// Model output: optional text plus the tool calls it requested, verbatim.
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    /// Outcome of one tool call, tagged with the originating request id.
    ToolResult {
        call_id: String,
        tool_name: String,
        envelope: ToolResultEnvelope,
    },
}

impl ConversationTurn {
    pub fn role(&self) -> Role {
        match self {
            ConversationTurn::System { .. } => Role::System,
            ConversationTurn::User { .. } => Role::User,
            ConversationTurn::Assistant { .. } => Role::Assistant,
            ConversationTurn::ToolResult { .. } => Role::ToolResult,
        }
    }

    /// Text content of the turn, if it has any
    pub fn text(&self) -> Option<&str> {
        match self {
            ConversationTurn::System { content } | ConversationTurn::User { content } => {
                Some(content)
            }
            ConversationTurn::Assistant { content, .. } => content.as_deref(),
            ConversationTurn::ToolResult { .. } => None,
        }
    }

    /// Tool calls carried by an assistant turn (empty for other roles)
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            ConversationTurn::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

/// Violation of the request/result correlation invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrelationError {
    #[error("Tool result at position {position} references unknown call id '{call_id}'")]
    UnknownCallId { position: usize, call_id: String },

    #[error("Call id '{call_id}' received more than one tool result")]
    DuplicateResult { call_id: String },

    #[error("Call id '{call_id}' has no tool result before position {position}")]
    MissingResult { position: usize, call_id: String },
}

/// Ordered, append-only sequence of turns.
///
/// Only [`clear`](Self::clear) removes entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::System {
            content: content.into(),
        });
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::User {
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: Option<String>, tool_calls: Vec<ToolCallRequest>) {
        self.push(ConversationTurn::Assistant {
            content,
            tool_calls,
        });
    }

    pub fn push_tool_result(
        &mut self,
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        envelope: ToolResultEnvelope,
    ) {
        self.push(ConversationTurn::ToolResult {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            envelope,
        });
    }

    /// Remove every turn
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Number of turns with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role() == role).count()
    }

    /// Verify that every tool result answers exactly one earlier request and
    /// every request is answered before the next assistant turn.
    pub fn check_correlation(&self) -> Result<(), CorrelationError> {
        let mut pending: Vec<&str> = Vec::new();
        let mut answered: HashSet<&str> = HashSet::new();

        for (position, turn) in self.turns.iter().enumerate() {
            match turn {
                ConversationTurn::Assistant { tool_calls, .. } => {
                    if let Some(call_id) = pending.first() {
                        return Err(CorrelationError::MissingResult {
                            position,
                            call_id: call_id.to_string(),
                        });
                    }
                    pending = tool_calls.iter().map(|c| c.id.as_str()).collect();
                }
                ConversationTurn::ToolResult { call_id, .. } => {
                    if let Some(index) = pending.iter().position(|id| id == call_id) {
                        pending.remove(index);
                        answered.insert(call_id.as_str());
                    } else if answered.contains(call_id.as_str()) {
                        return Err(CorrelationError::DuplicateResult {
                            call_id: call_id.clone(),
                        });
                    } else {
                        return Err(CorrelationError::UnknownCallId {
                            position,
                            call_id: call_id.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        match pending.first() {
            Some(call_id) => Err(CorrelationError::MissingResult {
                position: self.turns.len(),
                call_id: call_id.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(id: &str) -> ToolCallRequest {
        ToolCallRequest::from_value(id, "calculator", &json!({}))
    }

    #[test]
    fn test_history_grows_and_clears() {
        let mut history = ConversationHistory::new();
        history.push_system("instructions");
        history.push_user("hello");
        history.push_assistant(Some("hi".to_string()), vec![]);

        assert_eq!(history.len(), 3);
        assert_eq!(history.count_role(Role::User), 1);
        assert_eq!(history.last().unwrap().text(), Some("hi"));

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_correlation_ok() {
        let mut history = ConversationHistory::new();
        history.push_user("2+3 and 4*5?");
        history.push_assistant(None, vec![call("a"), call("b")]);
        history.push_tool_result("a", "calculator", ToolResultEnvelope::success(json!(5)));
        history.push_tool_result("b", "calculator", ToolResultEnvelope::success(json!(20)));
        history.push_assistant(Some("5 and 20".to_string()), vec![]);

        assert!(history.check_correlation().is_ok());
    }

    #[test]
    fn test_correlation_unknown_id() {
        let mut history = ConversationHistory::new();
        history.push_assistant(None, vec![call("a")]);
        history.push_tool_result("zzz", "calculator", ToolResultEnvelope::failure("x"));

        assert!(matches!(
            history.check_correlation(),
            Err(CorrelationError::UnknownCallId { position: 1, .. })
        ));
    }

    #[test]
    fn test_correlation_duplicate_result() {
        let mut history = ConversationHistory::new();
        history.push_assistant(None, vec![call("a")]);
        history.push_tool_result("a", "calculator", ToolResultEnvelope::success(json!(1)));
        history.push_tool_result("a", "calculator", ToolResultEnvelope::success(json!(1)));

        assert!(matches!(
            history.check_correlation(),
            Err(CorrelationError::DuplicateResult { .. })
        ));
    }

    #[test]
    fn test_correlation_missing_result() {
        let mut history = ConversationHistory::new();
        history.push_assistant(None, vec![call("a"), call("b")]);
        history.push_tool_result("a", "calculator", ToolResultEnvelope::success(json!(1)));
        history.push_assistant(Some("done".to_string()), vec![]);

        assert!(matches!(
            history.check_correlation(),
            Err(CorrelationError::MissingResult { position: 2, .. })
        ));
    }

    #[test]
    fn test_turn_serialization_is_role_tagged() {
        let turn = ConversationTurn::ToolResult {
            call_id: "call_1".to_string(),
            tool_name: "calculator".to_string(),
            envelope: ToolResultEnvelope::success(json!({"result": 5.0})),
        };
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "tool_result");
        assert_eq!(value["call_id"], "call_1");
        assert_eq!(value["envelope"]["data"]["result"], 5.0);
    }
}
