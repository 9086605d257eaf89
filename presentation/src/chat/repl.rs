//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::progress::reporter::ChatProgressReporter;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use toolchat_application::{
    ChatProgressNotifier, ConversationOrchestrator, ModelGateway, NoChatProgress,
    ToolExecutorPort,
};
use tokio_util::sync::CancellationToken;

/// What the loop should do after a slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Quit,
}

/// Interactive chat REPL over a single conversation
pub struct ChatRepl<G: ModelGateway + 'static, T: ToolExecutorPort + 'static> {
    orchestrator: ConversationOrchestrator<G, T>,
    show_progress: bool,
}

impl<G: ModelGateway + 'static, T: ToolExecutorPort + 'static> ChatRepl<G, T> {
    pub fn new(orchestrator: ConversationOrchestrator<G, T>) -> Self {
        Self {
            orchestrator,
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("toolchat").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let tool_count = self.orchestrator.initialize();
        self.print_welcome(tool_count);

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandOutcome::Quit {
                            break;
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self, tool_count: usize) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              toolchat - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "{} tools available, up to {} model rounds per message.",
            tool_count,
            self.orchestrator.config().max_iterations
        );
        println!("Type /help for commands, Ctrl-C cancels a running message.");
        println!();
    }

    fn handle_command(&mut self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return CommandOutcome::Quit;
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?     - Show this help");
                println!("  /tools            - List the tools the model can call");
                println!("  /reset            - Start a new conversation");
                println!("  /history          - Show the conversation so far");
                println!("  /quit, /exit, /q  - Exit chat");
                println!();
            }
            "/tools" => {
                println!();
                print!("{}", ConsoleFormatter::format_tools(&self.orchestrator.list_tools()));
                println!();
            }
            "/reset" => {
                self.orchestrator.reset();
                println!("Conversation cleared.");
            }
            "/history" => {
                println!();
                print!("{}", ConsoleFormatter::format_history(self.orchestrator.history()));
                println!();
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        CommandOutcome::Continue
    }

    async fn process_message(&mut self, message: &str) {
        println!();

        let token = CancellationToken::new();
        self.orchestrator.set_cancellation(token.clone());
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });

        let reporter = ChatProgressReporter::new();
        let progress: &dyn ChatProgressNotifier = if self.show_progress {
            &reporter
        } else {
            &NoChatProgress
        };

        let result = self
            .orchestrator
            .submit_message_detailed(message, progress)
            .await;
        watcher.abort();

        match result {
            Ok(output) => println!("{}", ConsoleFormatter::format_output(&output)),
            Err(e) if e.is_cancelled() => println!("{}", "Cancelled.".yellow()),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
        println!();
    }
}
