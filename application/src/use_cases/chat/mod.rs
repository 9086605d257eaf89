//! Chat use case
//!
//! [`ConversationOrchestrator`] owns the conversation history and runs the
//! bounded tool loop for each submitted message:
//!
//! ```text
//! user text → [model → tool calls → tool results]* → final text
//! ```
//!
//! Every model round trip sees the full history. Tool calls from one
//! assistant turn are dispatched through the [`ToolExecutorPort`] and each
//! result is appended as a tool-result turn tagged with the call id before
//! the next round trip. The loop stops on the first assistant turn without
//! tool calls, or after `max_iterations` round trips.

mod types;

pub use types::{
    ChatError, ChatOutput, ITERATION_LIMIT_TEXT, NO_RESPONSE_TEXT, Termination, ToolCallRecord,
};

use crate::config::ChatConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::model_gateway::{CompletionRequest, GatewayError, ModelGateway};
use crate::ports::progress::{ChatProgressNotifier, NoChatProgress};
use crate::ports::tool_executor::ToolExecutorPort;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolchat_domain::{
    ConversationHistory, LlmResponse, PromptTemplate, ToolCallRequest, ToolDescriptor,
    ToolResultEnvelope,
};
use tracing::{debug, info, warn};

const ARGS_PREVIEW_CHARS: usize = 80;

/// Orchestrates one conversation between a user, a model and the tools.
///
/// Methods that touch history take `&mut self`, so a single orchestrator
/// never processes two messages at once. Run independent conversations on
/// separate orchestrators sharing the same gateway and tools.
pub struct ConversationOrchestrator<G: ModelGateway + 'static, T: ToolExecutorPort + 'static> {
    gateway: Arc<G>,
    tools: Arc<T>,
    config: ChatConfig,
    history: ConversationHistory,
    tool_cache: Option<Vec<ToolDescriptor>>,
    cancellation_token: Option<CancellationToken>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: ModelGateway + 'static, T: ToolExecutorPort + 'static> ConversationOrchestrator<G, T> {
    pub fn new(gateway: Arc<G>, tools: Arc<T>) -> Self {
        Self {
            gateway,
            tools,
            config: ChatConfig::default(),
            history: ConversationHistory::new(),
            tool_cache: None,
            cancellation_token: None,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Swap the token, e.g. for a fresh one after a cancelled message.
    pub fn set_cancellation(&mut self, token: CancellationToken) {
        self.cancellation_token = Some(token);
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Cache the tool list. Runs at most once; later calls are no-ops.
    ///
    /// Returns the number of available tools.
    pub fn initialize(&mut self) -> usize {
        let tools = self.tool_cache.get_or_insert_with(|| {
            let descriptors: Vec<ToolDescriptor> =
                self.tools.descriptors().into_iter().cloned().collect();
            info!(count = descriptors.len(), "Tool list cached");
            descriptors
        });
        tools.len()
    }

    /// Descriptors of every tool offered to the model, in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        match &self.tool_cache {
            Some(cached) => cached.clone(),
            None => self.tools.descriptors().into_iter().cloned().collect(),
        }
    }

    /// Forget the conversation. The next message starts from a fresh system turn.
    pub fn reset(&mut self) {
        debug!(turns = self.history.len(), "Conversation reset");
        self.history.clear();
    }

    /// Process one user message and return the final text.
    ///
    /// Hitting the iteration cap is not an error: the sentinel
    /// [`ITERATION_LIMIT_TEXT`] is returned instead.
    pub async fn submit_message(&mut self, text: &str) -> Result<String, ChatError> {
        self.submit_message_detailed(text, &NoChatProgress)
            .await
            .map(|output| output.response)
    }

    /// Process one user message, reporting progress and returning the full outcome.
    pub async fn submit_message_detailed(
        &mut self,
        text: &str,
        progress: &dyn ChatProgressNotifier,
    ) -> Result<ChatOutput, ChatError> {
        let result = self.run(text, progress).await;
        progress.on_complete();

        match &result {
            Ok(output) => self.conversation_logger.log(ConversationEvent::new(
                "chat_complete",
                serde_json::json!({
                    "termination": output.termination.as_str(),
                    "iterations": output.iterations,
                    "tool_calls": output.tool_calls.len(),
                }),
            )),
            Err(e) => warn!(error = %e, "Message processing aborted"),
        }

        result
    }

    async fn run(
        &mut self,
        text: &str,
        progress: &dyn ChatProgressNotifier,
    ) -> Result<ChatOutput, ChatError> {
        self.initialize();

        if self.history.is_empty() {
            let system = match &self.config.system_prompt {
                Some(prompt) => prompt.clone(),
                None => PromptTemplate::system(self.tool_cache.as_deref().unwrap_or_default()),
            };
            self.history.push_system(system);
        }
        self.history.push_user(text);
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({ "text": text }),
        ));

        let max_iterations = self.config.max_iterations.max(1);
        let mut records = Vec::new();

        for iteration in 1..=max_iterations {
            check_cancelled(&self.cancellation_token)?;
            progress.on_model_request(iteration, max_iterations);

            let response = self.request_completion().await?;
            let reply = response.text();
            let calls = response.tool_calls();

            debug!(
                iteration,
                tool_calls = calls.len(),
                has_text = reply.is_some(),
                "Model responded"
            );
            self.conversation_logger.log(ConversationEvent::new(
                "model_response",
                serde_json::json!({
                    "iteration": iteration,
                    "text": reply,
                    "tool_calls": calls.len(),
                }),
            ));

            self.history.push_assistant(reply.clone(), calls.clone());

            if calls.is_empty() {
                let (response, termination) = match reply {
                    Some(text) => (text, Termination::Final),
                    None => (NO_RESPONSE_TEXT.to_string(), Termination::EmptyResponse),
                };
                return Ok(ChatOutput {
                    response,
                    termination,
                    iterations: iteration,
                    tool_calls: records,
                });
            }

            let envelopes = self.dispatch_all(&calls, progress).await;
            for (call, envelope) in calls.into_iter().zip(envelopes) {
                self.conversation_logger.log(ConversationEvent::new(
                    "tool_result",
                    serde_json::json!({
                        "call_id": call.id,
                        "tool": call.name,
                        "success": envelope.is_success(),
                        "envelope": envelope,
                    }),
                ));
                records.push(ToolCallRecord {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    success: envelope.is_success(),
                });
                self.history.push_tool_result(call.id, call.name, envelope);
            }
        }

        warn!(max_iterations, "Iteration cap reached without a final answer");
        Ok(ChatOutput {
            response: ITERATION_LIMIT_TEXT.to_string(),
            termination: Termination::IterationLimit,
            iterations: max_iterations,
            tool_calls: records,
        })
    }

    /// One gateway round trip with the full history and the cached tools.
    async fn request_completion(&self) -> Result<LlmResponse, ChatError> {
        let tools = self.tool_cache.as_deref().unwrap_or_default();
        let request = CompletionRequest::new(self.history.turns(), tools);
        let call = async {
            match self.config.model_timeout {
                Some(limit) => tokio::time::timeout(limit, self.gateway.complete(request))
                    .await
                    .unwrap_or_else(|_| {
                        warn!(
                            model = self.gateway.model(),
                            seconds = limit.as_secs_f64(),
                            "Model request timed out"
                        );
                        Err(GatewayError::Timeout)
                    }),
                None => self.gateway.complete(request).await,
            }
        };

        // Abandoning a round trip leaves no unanswered tool calls in history
        let response = match &self.cancellation_token {
            Some(token) => tokio::select! {
                _ = token.cancelled() => return Err(ChatError::Cancelled),
                response = call => response,
            },
            None => call.await,
        };

        Ok(response?)
    }

    /// Dispatch every call of one assistant turn, returning envelopes in request order.
    async fn dispatch_all(
        &self,
        calls: &[ToolCallRequest],
        progress: &dyn ChatProgressNotifier,
    ) -> Vec<ToolResultEnvelope> {
        for call in calls {
            progress.on_tool_call(&call.name, &args_preview(&call.arguments));
            self.conversation_logger.log(ConversationEvent::new(
                "tool_call",
                serde_json::json!({
                    "call_id": call.id,
                    "tool": call.name,
                    "arguments": call.arguments,
                }),
            ));
        }

        let envelopes = if self.config.parallel_tool_calls && calls.len() > 1 {
            futures::future::join_all(calls.iter().map(|call| self.dispatch(call))).await
        } else {
            let mut envelopes = Vec::with_capacity(calls.len());
            for call in calls {
                envelopes.push(self.dispatch(call).await);
            }
            envelopes
        };

        for (call, envelope) in calls.iter().zip(&envelopes) {
            progress.on_tool_result(&call.name, envelope.is_success());
        }

        envelopes
    }

    async fn dispatch(&self, call: &ToolCallRequest) -> ToolResultEnvelope {
        match call.parse_arguments() {
            Ok(arguments) => {
                debug!(tool = %call.name, call_id = %call.id, "Dispatching tool call");
                self.tools.invoke(&call.name, &arguments).await
            }
            Err(e) => {
                warn!(tool = %call.name, call_id = %call.id, error = %e, "Unparseable tool arguments");
                ToolResultEnvelope::from_error(&e)
            }
        }
    }
}

/// Check if cancellation has been requested.
fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), ChatError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(ChatError::Cancelled);
    }
    Ok(())
}

fn args_preview(arguments: &str) -> String {
    let trimmed = arguments.trim();
    if trimmed.chars().count() <= ARGS_PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(ARGS_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}
