use async_trait::async_trait;
use futures_util::stream;
use lantern_llm::{ChatProvider, ChatResponse, ChatStream, LlmError, StreamDelta};
use lantern_protocol::{ChatMessage, FinishReason, ToolCall, ToolExchange, ToolSpec};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

fn text_response(text: impl Into<String>) -> ChatResponse {
    ChatResponse {
        message: ChatMessage::assistant(text),
        tool_calls: Vec::new(),
        finish_reason: FinishReason::Stop,
    }
}

/// Provider that answers every call with the same text.
#[derive(Debug, Clone)]
pub struct FixedChatProvider {
    response: String,
}

impl FixedChatProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for FixedChatProvider {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        Ok(text_response(self.response.clone()))
    }

    async fn chat_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tools: &[ToolSpec],
        _exchanges: &[ToolExchange],
    ) -> Result<ChatResponse, LlmError> {
        Ok(text_response(self.response.clone()))
    }

    async fn chat_stream(&self, _messages: &[ChatMessage]) -> Result<ChatStream, LlmError> {
        let deltas = vec![
            Ok(StreamDelta {
                text: self.response.clone(),
                finish_reason: None,
            }),
            Ok(StreamDelta {
                text: String::new(),
                finish_reason: Some(FinishReason::Stop),
            }),
        ];
        Ok(Box::pin(stream::iter(deltas)))
    }
}

/// One scripted turn for [`RecordingChatProvider`].
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Plain assistant text.
    Text(String),
    /// A tool-call round; the text accompanies the calls (often empty).
    ToolCalls(Vec<ToolCall>),
}

/// Provider that replays a script and records everything it is asked.
///
/// Each call pops the next scripted reply; once the script is exhausted
/// every call answers with the fallback text. Captured messages, tool
/// names, and exchanges are shared via `Arc` so tests can inspect them
/// after handing the provider off.
#[derive(Debug, Clone)]
pub struct RecordingChatProvider {
    fallback: String,
    script: Arc<Mutex<VecDeque<ScriptedReply>>>,
    /// Message slices from each call, in call order.
    pub calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    /// Tool names offered on each `chat_with_tools` call.
    pub seen_tools: Arc<Mutex<Vec<Vec<String>>>>,
    /// Exchanges replayed on each `chat_with_tools` call.
    pub seen_exchanges: Arc<Mutex<Vec<Vec<ToolExchange>>>>,
}

impl RecordingChatProvider {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            seen_tools: Arc::new(Mutex::new(Vec::new())),
            seen_exchanges: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a plain-text reply.
    pub fn script_text(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .push_back(ScriptedReply::Text(text.into()));
        self
    }

    /// Queue a tool-call round.
    pub fn script_tool_calls(self, calls: Vec<ToolCall>) -> Self {
        self.script.lock().push_back(ScriptedReply::ToolCalls(calls));
        self
    }

    /// Number of chat calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn next_reply(&self) -> ChatResponse {
        match self.script.lock().pop_front() {
            Some(ScriptedReply::Text(text)) => text_response(text),
            Some(ScriptedReply::ToolCalls(calls)) => ChatResponse {
                message: ChatMessage::assistant(""),
                tool_calls: calls,
                finish_reason: FinishReason::ToolCalls,
            },
            None => text_response(self.fallback.clone()),
        }
    }
}

#[async_trait]
impl ChatProvider for RecordingChatProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        self.calls.lock().push(messages.to_vec());
        Ok(self.next_reply())
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        exchanges: &[ToolExchange],
    ) -> Result<ChatResponse, LlmError> {
        self.calls.lock().push(messages.to_vec());
        self.seen_tools
            .lock()
            .push(tools.iter().map(|tool| tool.name.clone()).collect());
        self.seen_exchanges.lock().push(exchanges.to_vec());
        Ok(self.next_reply())
    }

    async fn chat_stream(&self, messages: &[ChatMessage]) -> Result<ChatStream, LlmError> {
        let response = self.chat(messages).await?;
        let deltas = vec![
            Ok(StreamDelta {
                text: response.message.text,
                finish_reason: None,
            }),
            Ok(StreamDelta {
                text: String::new(),
                finish_reason: Some(FinishReason::Stop),
            }),
        ];
        Ok(Box::pin(stream::iter(deltas)))
    }
}

/// Provider that streams a fixed chunk sequence.
#[derive(Debug, Clone)]
pub struct StreamingChatProvider {
    chunks: Vec<String>,
    response: String,
}

impl StreamingChatProvider {
    pub fn new(chunks: Vec<String>) -> Self {
        let response = chunks.join("");
        Self { chunks, response }
    }
}

#[async_trait]
impl ChatProvider for StreamingChatProvider {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        Ok(text_response(self.response.clone()))
    }

    async fn chat_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tools: &[ToolSpec],
        _exchanges: &[ToolExchange],
    ) -> Result<ChatResponse, LlmError> {
        Ok(text_response(self.response.clone()))
    }

    async fn chat_stream(&self, _messages: &[ChatMessage]) -> Result<ChatStream, LlmError> {
        let mut deltas = self
            .chunks
            .iter()
            .cloned()
            .map(|text| {
                Ok(StreamDelta {
                    text,
                    finish_reason: None,
                })
            })
            .collect::<Vec<_>>();
        deltas.push(Ok(StreamDelta {
            text: String::new(),
            finish_reason: Some(FinishReason::Stop),
        }));
        Ok(Box::pin(stream::iter(deltas)))
    }
}

/// Provider that fails every call with [`LlmError::EmptyCompletion`].
#[derive(Debug, Clone, Default)]
pub struct FailingChatProvider;

impl FailingChatProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatProvider for FailingChatProvider {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        Err(LlmError::EmptyCompletion)
    }

    async fn chat_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tools: &[ToolSpec],
        _exchanges: &[ToolExchange],
    ) -> Result<ChatResponse, LlmError> {
        Err(LlmError::EmptyCompletion)
    }

    async fn chat_stream(&self, _messages: &[ChatMessage]) -> Result<ChatStream, LlmError> {
        Err(LlmError::EmptyCompletion)
    }
}
