//! File tool: read_file over a fixed in-memory filesystem
//!
//! Files are looked up by the last component of the requested path, so
//! `docs/notes.md` and `notes.md` resolve to the same entry.

use async_trait::async_trait;
use serde_json::{Value, json};
use toolchat_domain::tool::{
    ArgumentValidator, Arguments, DefaultArgumentValidator, Tool, ToolDescriptor, ToolError,
    ToolParameter, ToolResultEnvelope,
};

/// Tool name constant
pub const READ_FILE: &str = "read_file";

const MOCK_FILES: &[(&str, &str)] = &[
    (
        "config.json",
        r#"{"app": "MCP Demo", "version": "1.0", "debug": true}"#,
    ),
    (
        "data.txt",
        "This is sample data from a file.\nSecond line of data.",
    ),
    (
        "notes.md",
        "# Notes\n\n## Project Ideas\n- Build MCP tools\n- Create UI",
    ),
    (
        "users.csv",
        "id,name,email\n1,John Doe,john@example.com\n2,Jane Smith,jane@example.com",
    ),
];

/// Reads file contents from the mock filesystem
pub struct ReadFileTool {
    descriptor: ToolDescriptor,
}

impl ReadFileTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(READ_FILE, "Reads content from a file")
            .with_parameter(ToolParameter::new("path", "Path to the file to read", true));
        Self { descriptor }
    }

    /// Names of every file that can be read
    pub fn available_files() -> impl Iterator<Item = &'static str> {
        MOCK_FILES.iter().map(|(name, _)| *name)
    }

    fn lookup(path: &str) -> Option<&'static str> {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        MOCK_FILES
            .iter()
            .find(|(name, _)| *name == file_name)
            .map(|(_, content)| *content)
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, arguments: &Arguments) -> Result<ToolResultEnvelope, ToolError> {
        DefaultArgumentValidator.validate(arguments, &self.descriptor)?;

        let path = arguments
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_arguments("'path' must be a string"))?;

        let content = Self::lookup(path)
            .ok_or_else(|| ToolError::execution_failed(format!("File not found: {}", path)))?;

        tracing::debug!(path = %path, size = content.len(), "Read mock file");

        Ok(ToolResultEnvelope::success(json!({
            "path": path,
            "content": content,
            "size": content.chars().count(),
        })))
    }
}
