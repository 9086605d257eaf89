//! Console output formatter for chat results

use colored::Colorize;
use toolchat_application::{ChatOutput, Termination};
use toolchat_domain::{ConversationHistory, ConversationTurn, ToolDescriptor};

/// Longest tool result shown by [`ConsoleFormatter::format_history`]
const RESULT_PREVIEW_CHARS: usize = 120;

/// Formats chat results, tool listings and history for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The answer text, followed by a dimmed note when the loop did not end normally.
    pub fn format_output(output: &ChatOutput) -> String {
        let mut text = output.response.clone();

        match output.termination {
            Termination::Final => {}
            Termination::EmptyResponse => {
                text.push_str(&format!("\n{}", "(the model returned no text)".dimmed()));
            }
            Termination::IterationLimit => {
                text.push_str(&format!(
                    "\n{}",
                    format!(
                        "(stopped after {} rounds, {} tool calls)",
                        output.iterations,
                        output.tool_calls.len()
                    )
                    .yellow()
                ));
            }
        }

        text
    }

    /// Format as JSON
    pub fn format_json(output: &ChatOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Tool names, descriptions and parameters in registration order
    pub fn format_tools(tools: &[ToolDescriptor]) -> String {
        if tools.is_empty() {
            return "No tools available.\n".to_string();
        }

        let mut out = format!("{}\n", "Available tools:".cyan().bold());
        for tool in tools {
            out.push_str(&format!("\n  {}\n", tool.name.bold()));
            out.push_str(&Self::indent(&tool.description, "    "));
            out.push('\n');

            for param in &tool.parameters {
                let mut line = format!(
                    "      - {} ({}{})",
                    param.name,
                    param.param_type.as_str(),
                    if param.required { ", required" } else { "" }
                );
                if !param.allowed_values.is_empty() {
                    line.push_str(&format!(" one of: {}", param.allowed_values.join(", ")));
                }
                if let Some(default) = &param.default {
                    line.push_str(&format!(" [default: {}]", default));
                }
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    /// One line per turn; the system prompt is summarized.
    pub fn format_history(history: &ConversationHistory) -> String {
        if history.is_empty() {
            return "(empty conversation)\n".to_string();
        }

        let mut out = String::new();
        for turn in history.turns() {
            let line = match turn {
                ConversationTurn::System { content } => format!(
                    "{} {} chars",
                    "system".dimmed(),
                    content.chars().count()
                ),
                ConversationTurn::User { content } => format!("{} {}", "you".green().bold(), content),
                ConversationTurn::Assistant {
                    content,
                    tool_calls,
                } => {
                    let mut line = format!("{}", "assistant".cyan().bold());
                    if let Some(text) = content {
                        line.push_str(&format!(" {}", text));
                    }
                    for call in tool_calls {
                        line.push_str(&format!(" [{}({})]", call.name, call.arguments));
                    }
                    line
                }
                ConversationTurn::ToolResult {
                    call_id,
                    tool_name,
                    envelope,
                } => {
                    let status = if envelope.is_success() {
                        "ok".green()
                    } else {
                        "error".red()
                    };
                    format!(
                        "{} {} {} {}",
                        "tool".yellow(),
                        format!("{}#{}", tool_name, call_id).dimmed(),
                        status,
                        Self::truncate(&envelope.to_json_string(), RESULT_PREVIEW_CHARS)
                    )
                }
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolchat_application::ToolCallRecord;
    use toolchat_domain::{ToolCallRequest, ToolParameter, ToolResultEnvelope};

    fn output(termination: Termination) -> ChatOutput {
        ChatOutput {
            response: "The answer is 5.".to_string(),
            termination,
            iterations: 2,
            tool_calls: vec![ToolCallRecord {
                id: "call_1".to_string(),
                name: "calculator".to_string(),
                success: true,
            }],
        }
    }

    #[test]
    fn test_final_output_is_plain_text() {
        assert_eq!(
            ConsoleFormatter::format_output(&output(Termination::Final)),
            "The answer is 5."
        );
    }

    #[test]
    fn test_iteration_limit_note() {
        let text = ConsoleFormatter::format_output(&output(Termination::IterationLimit));
        assert!(text.starts_with("The answer is 5."));
        assert!(text.contains("stopped after 2 rounds, 1 tool calls"));
    }

    #[test]
    fn test_json_output() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&output(Termination::Final)))
                .unwrap();

        assert_eq!(value["response"], "The answer is 5.");
        assert_eq!(value["termination"], "final");
        assert_eq!(value["tool_calls"][0]["name"], "calculator");
    }

    #[test]
    fn test_format_tools() {
        let tools = vec![
            ToolDescriptor::new("get_weather", "Current weather")
                .with_parameter(ToolParameter::new("city", "City name", true))
                .with_parameter(
                    ToolParameter::new("units", "Units", false)
                        .with_allowed_values(["celsius", "fahrenheit"])
                        .with_default("celsius"),
                ),
        ];

        let text = ConsoleFormatter::format_tools(&tools);

        assert!(text.contains("get_weather"));
        assert!(text.contains("- city (string, required)"));
        assert!(text.contains("one of: celsius, fahrenheit"));
        assert!(text.contains("[default: \"celsius\"]"));
        assert_eq!(ConsoleFormatter::format_tools(&[]), "No tools available.\n");
    }

    #[test]
    fn test_format_history() {
        let mut history = ConversationHistory::new();
        history.push_system("prompt");
        history.push_user("add 2 and 3");
        history.push_assistant(
            None,
            vec![ToolCallRequest::new("call_1", "calculator", r#"{"a":2}"#)],
        );
        history.push_tool_result(
            "call_1",
            "calculator",
            ToolResultEnvelope::success(json!({"result": 5.0})),
        );

        let text = ConsoleFormatter::format_history(&history);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("6 chars"));
        assert!(lines[1].contains("add 2 and 3"));
        assert!(lines[2].contains(r#"[calculator({"a":2})]"#));
        assert!(lines[3].contains("calculator#call_1"));
        assert!(lines[3].contains("\"result\":5.0"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(ConsoleFormatter::truncate("short", 10), "short");
        assert_eq!(ConsoleFormatter::truncate("abcdefghij", 4), "abcd...");
    }
}
