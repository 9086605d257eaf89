//! Prompt templates for the tool-calling conversation

use crate::tool::entities::ToolDescriptor;

/// Templates for the operating instructions seeded at the start of a conversation
pub struct PromptTemplate;

impl PromptTemplate {
    /// Fixed preamble of the system prompt
    pub fn system_preamble() -> &'static str {
        r#"You are a helpful AI assistant with access to real-time tools.

IMPORTANT: You have access to these tools and MUST use them when appropriate:"#
    }

    /// Closing guidance appended after the tool list
    pub fn system_guidance() -> &'static str {
        r#"When a question can be answered with one of these tools:
1. DO NOT say you cannot access real-time data or files
2. ALWAYS call the matching tool
3. Use the tool's response to answer the question

If a tool reports an error, explain it to the user instead of guessing."#
    }

    /// Build the system prompt listing every available tool.
    ///
    /// The first sentence of each description is used as the capability hint.
    pub fn system(tools: &[ToolDescriptor]) -> String {
        let mut prompt = String::from(Self::system_preamble());
        prompt.push('\n');

        if tools.is_empty() {
            prompt.push_str("- (no tools are currently available)\n");
        }
        for tool in tools {
            prompt.push_str(&format!("- {}: {}\n", tool.name, Self::hint(&tool.description)));
        }

        prompt.push('\n');
        prompt.push_str(Self::system_guidance());
        prompt
    }

    fn hint(description: &str) -> String {
        let flattened = description.split_whitespace().collect::<Vec<_>>().join(" ");
        match flattened.find(". ") {
            Some(end) => flattened[..=end].to_string(),
            None => flattened,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_lists_tools_in_order() {
        let tools = vec![
            ToolDescriptor::new("calculator", "Performs basic arithmetic operations"),
            ToolDescriptor::new(
                "get_weather",
                "Gets current weather for any city.\n   Use it for ALL weather queries.",
            ),
        ];

        let prompt = PromptTemplate::system(&tools);

        let calc = prompt.find("- calculator: Performs basic arithmetic operations").unwrap();
        let weather = prompt.find("- get_weather: Gets current weather for any city.").unwrap();
        assert!(calc < weather);
        assert!(!prompt.contains("ALL weather queries"));
        assert!(prompt.contains("ALWAYS call the matching tool"));
    }

    #[test]
    fn test_system_prompt_without_tools() {
        let prompt = PromptTemplate::system(&[]);
        assert!(prompt.contains("no tools are currently available"));
    }
}
