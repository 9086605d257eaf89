//! Progress notification port
//!
//! Defines the interface for reporting progress while a message is being
//! processed by the tool loop.

/// Callback for progress updates during a chat turn
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait ChatProgressNotifier: Send + Sync {
    /// Called before each model round trip (1-based)
    fn on_model_request(&self, iteration: usize, max_iterations: usize);

    /// Called when the model asks for a tool
    fn on_tool_call(&self, tool_name: &str, args_preview: &str);

    /// Called when a tool call finishes
    fn on_tool_result(&self, tool_name: &str, success: bool);

    /// Called once the turn is over, whatever the outcome
    fn on_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoChatProgress;

impl ChatProgressNotifier for NoChatProgress {
    fn on_model_request(&self, _iteration: usize, _max_iterations: usize) {}
    fn on_tool_call(&self, _tool_name: &str, _args_preview: &str) {}
    fn on_tool_result(&self, _tool_name: &str, _success: bool) {}
}
