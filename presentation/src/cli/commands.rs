//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The answer text, with a note when the loop stopped early
    #[default]
    Text,
    /// The full outcome (answer, termination, tool calls) as JSON
    Json,
}

/// CLI arguments for toolchat
#[derive(Parser, Debug)]
#[command(name = "toolchat")]
#[command(author, version, about = "Chat with a model that can call local tools")]
#[command(long_about = r#"
toolchat sends your message to an OpenAI-compatible model together with a
set of tools (calculator, get_weather, read_file). When the model asks for a
tool, toolchat runs it and feeds the result back, until the model answers in
plain text or the iteration limit is reached.

Configuration files are loaded from (in priority order):
1. TOOLCHAT_* environment variables (e.g. TOOLCHAT_AGENT__MAX_ITERATIONS=3)
2. --config <path>      Explicit config file
3. ./toolchat.toml      Project-level config
4. ~/.config/toolchat/config.toml   Global config

Example:
  toolchat "What is 12.5 times 4?"
  toolchat --model gpt-4o-mini "What's the weather in Tokyo in fahrenheit?"
  toolchat --chat
"#)]
pub struct Cli {
    /// The message to send (not required in chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// List the available tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Maximum model round trips per message
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_iterations: Option<u32>,

    /// Model name sent to the provider
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible server
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Run the tool calls of one model turn one after another
    #[arg(long)]
    pub sequential_tools: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append a JSONL transcript of every conversation event to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
