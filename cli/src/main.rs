//! CLI entrypoint for toolchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolchat_application::{
    ChatProgressNotifier, ConversationLogger, ConversationOrchestrator, NoChatProgress,
};
use toolchat_domain::ToolDescriptor;
use toolchat_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiGateway, ToolRegistry,
};
use toolchat_presentation::{ChatProgressReporter, ChatRepl, Cli, ConsoleFormatter, OutputFormat};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Held until exit so buffered log lines are flushed
    let log_file = cli.log_file.as_deref().or(config.logging.file.as_deref());
    let _log_guard = init_logging(cli.verbose, log_file)?;

    info!("Starting toolchat");

    for issue in config.validate() {
        warn!("{}", issue);
    }

    // === Dependency Injection ===
    let registry = Arc::new(ToolRegistry::with_default_tools(
        config.tools.weather.to_settings(),
    ));

    if cli.list_tools {
        let tools: Vec<ToolDescriptor> = registry.list().into_iter().cloned().collect();
        print!("{}", ConsoleFormatter::format_tools(&tools));
        return Ok(());
    }

    let gateway = Arc::new(build_gateway(&cli, &config)?);

    let mut chat_config = config.to_chat_config();
    if let Some(max) = cli.max_iterations {
        chat_config = chat_config.with_max_iterations(max as usize);
    }
    if cli.sequential_tools {
        chat_config = chat_config.with_parallel_tool_calls(false);
    }

    let mut orchestrator = ConversationOrchestrator::new(gateway, registry).with_config(chat_config);

    let transcript = cli
        .conversation_log
        .as_ref()
        .or(config.logging.conversation_log.as_ref());
    if let Some(path) = transcript
        && let Some(logger) = JsonlConversationLogger::open(path)
    {
        info!(path = %logger.path().display(), "Writing conversation transcript");
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        orchestrator = orchestrator.with_conversation_logger(logger);
    }

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(orchestrator).with_progress(!cli.quiet);
        repl.run().await?;
        return Ok(());
    }

    // Single message mode - message is required
    let Some(message) = cli.message.as_deref() else {
        bail!("A message is required. Use --chat for interactive mode.");
    };

    let token = CancellationToken::new();
    orchestrator.set_cancellation(token.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let reporter = ChatProgressReporter::new();
    let progress: &dyn ChatProgressNotifier = if cli.quiet {
        &NoChatProgress
    } else {
        &reporter
    };

    let output = orchestrator
        .submit_message_detailed(message, progress)
        .await?;

    let rendered = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format_output(&output),
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    println!("{}", rendered);

    Ok(())
}

/// Install the tracing subscriber: stderr by default, a non-blocking file
/// writer when a log file is configured.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Gateway settings from config, with CLI overrides applied.
fn build_gateway(cli: &Cli, config: &FileConfig) -> Result<OpenAiGateway> {
    let mut openai = config.providers.openai.clone();
    if let Some(model) = &cli.model {
        openai.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        openai.base_url = base_url.clone();
    }

    let api_key = openai.resolve_api_key().ok_or_else(|| {
        anyhow!(
            "No API key found. Set {} or providers.openai.api_key in the config file.",
            openai.api_key_env
        )
    })?;

    info!(model = %openai.model, base_url = %openai.base_url, "Using OpenAI-compatible gateway");
    Ok(OpenAiGateway::new(openai.to_settings(api_key))?)
}
