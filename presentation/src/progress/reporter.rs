//! Progress reporting for message processing

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use toolchat_application::ports::progress::ChatProgressNotifier;

/// Spinner-based progress on stderr while the model and tools work
pub struct ChatProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ChatProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Run `f` with the current spinner, creating it on first use.
    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(pb);
    }
}

impl Default for ChatProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatProgressNotifier for ChatProgressReporter {
    fn on_model_request(&self, iteration: usize, max_iterations: usize) {
        self.with_spinner(|pb| {
            pb.set_prefix("Thinking");
            pb.set_message(format!("(round {}/{})", iteration, max_iterations));
        });
    }

    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        self.with_spinner(|pb| {
            pb.set_prefix("Running");
            pb.set_message(tool_name.to_string());
            pb.println(format!(
                "  {} {} {}",
                "->".cyan(),
                tool_name.bold(),
                args_preview.dimmed()
            ));
        });
    }

    fn on_tool_result(&self, tool_name: &str, success: bool) {
        self.with_spinner(|pb| {
            let mark = if success { "v".green() } else { "x".red() };
            pb.println(format!("  {} {}", mark, tool_name));
        });
    }

    fn on_complete(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle() {
        let reporter = ChatProgressReporter::new();

        reporter.on_model_request(1, 5);
        reporter.on_tool_call("calculator", r#"{"operation":"add"}"#);
        reporter.on_tool_result("calculator", true);
        reporter.on_model_request(2, 5);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_complete();
        assert!(reporter.spinner.lock().unwrap().is_none());

        // A completed reporter can be reused
        reporter.on_model_request(1, 5);
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_complete();
    }
}
