//! Conversion between domain types and OpenAI wire types.

use serde_json::Value;
use toolchat_application::ports::model_gateway::GatewayError;
use toolchat_application::ports::tool_schema::ToolSchemaPort;
use toolchat_domain::{ContentBlock, ConversationTurn, LlmResponse, StopReason, ToolDescriptor};

use super::types::{
    ErrorResponse, FunctionCall, FunctionDef, Message, Request, Response, ToolCall, ToolDef,
};
use crate::tools::JsonSchemaToolConverter;

/// Build the request body for one completion.
///
/// Tools are omitted entirely (along with `tool_choice`) when none are
/// available.
pub(crate) fn build_request<'a>(
    model: &'a str,
    history: &[ConversationTurn],
    tools: &[ToolDescriptor],
) -> Request<'a> {
    let converter = JsonSchemaToolConverter;
    let tool_defs: Vec<ToolDef> = tools
        .iter()
        .map(|tool| ToolDef {
            tool_type: "function",
            function: FunctionDef {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: converter.input_schema(tool),
            },
        })
        .collect();

    let has_tools = !tool_defs.is_empty();
    Request {
        model,
        messages: history.iter().map(convert_turn).collect(),
        tools: has_tools.then_some(tool_defs),
        tool_choice: has_tools.then_some("auto"),
    }
}

pub(crate) fn convert_turn(turn: &ConversationTurn) -> Message {
    match turn {
        ConversationTurn::System { content } => Message {
            role: "system",
            content: Some(content.clone()),
            tool_calls: None,
            tool_call_id: None,
        },
        ConversationTurn::User { content } => Message {
            role: "user",
            content: Some(content.clone()),
            tool_calls: None,
            tool_call_id: None,
        },
        ConversationTurn::Assistant {
            content,
            tool_calls,
        } => Message {
            role: "assistant",
            content: content
                .clone()
                .or_else(|| tool_calls.is_empty().then(String::new)),
            tool_calls: (!tool_calls.is_empty()).then(|| {
                tool_calls
                    .iter()
                    .map(|call| ToolCall {
                        id: call.id.clone(),
                        call_type: "function".to_string(),
                        function: FunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        },
                    })
                    .collect()
            }),
            tool_call_id: None,
        },
        ConversationTurn::ToolResult {
            call_id, envelope, ..
        } => Message {
            role: "tool",
            content: Some(envelope.to_json_string()),
            tool_calls: None,
            tool_call_id: Some(call_id.clone()),
        },
    }
}

/// Convert the first choice of a response into an [`LlmResponse`].
///
/// Tool calls without an id get a positional one (`call_0`, `call_1`, ...)
/// so every request in the turn stays correlatable.
pub(crate) fn convert_response(resp: Response) -> Result<LlmResponse, GatewayError> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content
        && !text.is_empty()
    {
        content.push(ContentBlock::Text { text });
    }
    for (index, call) in choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .enumerate()
    {
        let id = if call.id.is_empty() {
            format!("call_{}", index)
        } else {
            call.id
        };
        content.push(ContentBlock::ToolUse {
            id,
            name: call.function.name,
            arguments: call.function.arguments,
        });
    }

    Ok(LlmResponse {
        content,
        stop_reason: choice.finish_reason.as_deref().map(convert_stop_reason),
        model: resp.model,
    })
}

/// Parse a response body, reporting malformed JSON as an invalid response.
pub(crate) fn parse_response(body: &str) -> Result<LlmResponse, GatewayError> {
    let response: Response = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
    convert_response(response)
}

/// Map `finish_reason` strings to [`StopReason`].
pub(crate) fn convert_stop_reason(reason: &str) -> StopReason {
    match reason {
        "stop" => StopReason::EndTurn,
        "tool_calls" | "function_call" => StopReason::ToolUse,
        "length" => StopReason::MaxTokens,
        other => StopReason::Other(other.to_string()),
    }
}

/// Convert an HTTP status and error body into a [`GatewayError`].
pub(crate) fn convert_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map_or_else(|_| body.to_string(), |e| e.error.message);

    match status {
        401 | 403 => GatewayError::Authentication(message),
        429 => GatewayError::RateLimited(message),
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, message)),
    }
}

/// Serialize a request for logging or tests.
pub(crate) fn request_to_value(request: &Request<'_>) -> Value {
    serde_json::to_value(request).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolchat_domain::{ConversationHistory, ToolCallRequest, ToolParameter, ToolResultEnvelope};

    fn sample_history() -> ConversationHistory {
        let mut history = ConversationHistory::new();
        history.push_system("Use tools.");
        history.push_user("What is 2+3?");
        history.push_assistant(
            None,
            vec![ToolCallRequest::new(
                "call_abc",
                "calculator",
                r#"{"operation":"add","a":2,"b":3}"#,
            )],
        );
        history.push_tool_result(
            "call_abc",
            "calculator",
            ToolResultEnvelope::success(json!({"result": 5.0})),
        );
        history
    }

    #[test]
    fn test_build_request_with_tools() {
        let tools = vec![
            ToolDescriptor::new("calculator", "Arithmetic")
                .with_parameter(ToolParameter::new("operation", "Op", true)),
        ];
        let history = sample_history();

        let request = build_request("gpt-4o", history.turns(), &tools);
        let body = request_to_value(&request);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "calculator");
        assert_eq!(
            body["tools"][0]["function"]["parameters"]["required"],
            json!(["operation"])
        );

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], json!({"role": "system", "content": "Use tools."}));
        assert_eq!(messages[1], json!({"role": "user", "content": "What is 2+3?"}));

        assert_eq!(messages[2]["role"], "assistant");
        assert!(messages[2]["content"].is_null());
        assert_eq!(messages[2]["tool_calls"][0]["id"], "call_abc");
        assert_eq!(messages[2]["tool_calls"][0]["type"], "function");
        assert_eq!(
            messages[2]["tool_calls"][0]["function"]["arguments"],
            r#"{"operation":"add","a":2,"b":3}"#
        );

        assert_eq!(messages[3]["role"], "tool");
        assert_eq!(messages[3]["tool_call_id"], "call_abc");
        let content: Value =
            serde_json::from_str(messages[3]["content"].as_str().unwrap()).unwrap();
        assert_eq!(content, json!({"success": true, "data": {"result": 5.0}}));
    }

    #[test]
    fn test_build_request_without_tools() {
        let history = sample_history();
        let body = request_to_value(&build_request("gpt-4o", history.turns(), &[]));

        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn test_empty_assistant_turn_sends_empty_content() {
        let mut history = ConversationHistory::new();
        history.push_user("Hello");
        history.push_assistant(None, vec![]);
        history.push_user("Are you there?");

        let body = request_to_value(&build_request("gpt-4o", history.turns(), &[]));
        let messages = body["messages"].as_array().unwrap();

        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"], "");
        assert!(messages[1].get("tool_calls").is_none());
    }

    #[test]
    fn test_parse_text_response() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4o-2024-08-06",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello there"},
                "finish_reason": "stop"
            }]
        }"#;

        let response = parse_response(body).unwrap();

        assert_eq!(response.text().as_deref(), Some("Hello there"));
        assert!(!response.has_tool_calls());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.model.as_deref(), Some("gpt-4o-2024-08-06"));
    }

    #[test]
    fn test_parse_tool_call_response() {
        let body = r#"{
            "model": "gpt-4o",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [
                        {"id": "call_1", "type": "function",
                         "function": {"name": "get_weather", "arguments": "{\"city\":\"Paris\"}"}},
                        {"id": "call_2", "type": "function",
                         "function": {"name": "read_file", "arguments": "{\"path\":\"notes.md\"}"}}
                    ]
                },
                "finish_reason": "tool_calls"
            }]
        }"#;

        let response = parse_response(body).unwrap();
        let calls = response.tool_calls();

        assert_eq!(response.text(), None);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].name, "get_weather");
        assert_eq!(calls[0].parse_arguments().unwrap()["city"], "Paris");
        assert_eq!(calls[1].id, "call_2");
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
    }

    #[test]
    fn test_missing_ids_are_filled() {
        let body = r#"{"choices": [{"message": {"tool_calls": [
            {"function": {"name": "calculator", "arguments": "{}"}},
            {"function": {"name": "calculator"}}
        ]}}]}"#;

        let calls = parse_response(body).unwrap().tool_calls();
        assert_eq!(calls[0].id, "call_0");
        assert_eq!(calls[1].id, "call_1");
        assert_eq!(calls[1].arguments, "");
    }

    #[test]
    fn test_missing_choices_is_invalid() {
        let err = parse_response(r#"{"model": "gpt-4o"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));

        let err = parse_response(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn test_convert_error_statuses() {
        let body = r#"{"error": {"message": "Incorrect API key provided"}}"#;
        assert_eq!(
            convert_error(401, body),
            GatewayError::Authentication("Incorrect API key provided".to_string())
        );
        assert!(matches!(convert_error(403, "nope"), GatewayError::Authentication(_)));
        assert!(matches!(convert_error(429, "slow down"), GatewayError::RateLimited(_)));

        let err = convert_error(500, "upstream exploded");
        assert_eq!(
            err,
            GatewayError::RequestFailed("HTTP 500: upstream exploded".to_string())
        );
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(convert_stop_reason("length"), StopReason::MaxTokens);
        assert_eq!(
            convert_stop_reason("content_filter"),
            StopReason::Other("content_filter".to_string())
        );
    }
}
