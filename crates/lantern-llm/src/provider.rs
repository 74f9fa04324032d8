//! Chat provider interface consumed by conversation drivers.

use crate::LlmError;
use async_trait::async_trait;
use futures_util::stream::Stream;
use lantern_protocol::{ChatMessage, FinishReason, ToolCall, ToolExchange, ToolSpec};
use std::pin::Pin;

/// A full completion returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// The assistant reply (sequence unassigned).
    pub message: ChatMessage,
    /// Tool calls the model requested, empty when it answered directly.
    pub tool_calls: Vec<ToolCall>,
    /// Why the completion stopped.
    pub finish_reason: FinishReason,
}

impl ChatResponse {
    /// Reply text.
    pub fn text(&self) -> &str {
        &self.message.text
    }
}

/// One streamed fragment of a completion.
///
/// Partial deltas carry text and no finish reason; the final delta
/// carries the finish reason and possibly trailing text.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDelta {
    /// Partial reply text.
    pub text: String,
    /// Set on the final delta of the stream.
    pub finish_reason: Option<FinishReason>,
}

/// Boxed stream of completion deltas.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<StreamDelta, LlmError>> + Send>>;

/// Interface for chat completion backends.
///
/// Calls are stateless: continuity comes entirely from the message slice
/// the caller passes, which is how bounded memories provide context.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Complete a conversation and return the assistant reply.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError>;

    /// Complete a conversation with tools available to the model.
    ///
    /// `exchanges` replays tool rounds already executed for the current
    /// turn so the model can incorporate their outcomes.
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        exchanges: &[ToolExchange],
    ) -> Result<ChatResponse, LlmError>;

    /// Stream a completion as partial-text deltas followed by a final
    /// delta carrying the finish reason.
    async fn chat_stream(&self, messages: &[ChatMessage]) -> Result<ChatStream, LlmError>;

    /// Complete a conversation constrained to a JSON object response.
    ///
    /// The default delegates to [`ChatProvider::chat`]; backends with a
    /// native JSON response mode should override it.
    async fn chat_json(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let response = self.chat(messages).await?;
        Ok(response.message.text)
    }
}
