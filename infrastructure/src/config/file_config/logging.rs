//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration
///
/// ```toml
/// [logging]
/// file = "~/.local/state/toolchat/toolchat.log"   # diagnostics go here instead of stderr
/// conversation_log = "conversations.jsonl"       # JSONL transcript
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub file: Option<PathBuf>,
    pub conversation_log: Option<PathBuf>,
}
