//! Conversation driver tying memory, provider, tools, and retrieval.

use crate::CoreError;
use futures_util::StreamExt;
use lantern_llm::{ChatProvider, StreamDelta};
use lantern_memory::{ChatMemory, MessageWindowMemory};
use lantern_protocol::{ChatMessage, ToolCall, ToolError, ToolExchange, ToolOutcome};
use lantern_store::ContentRetriever;
use lantern_tools::ToolRegistry;
use log::{debug, warn};
use serde_json::{Value, json};
use std::sync::Arc;

/// Default window capacity when no memory is supplied.
const DEFAULT_WINDOW: usize = 10;

/// Default cap on tool rounds within one turn.
const DEFAULT_MAX_TOOL_ROUNDS: usize = 4;

/// Builder for [`Assistant`].
pub struct AssistantBuilder {
    provider: Arc<dyn ChatProvider>,
    memory: Option<Box<dyn ChatMemory>>,
    system_prompt: Option<String>,
    tools: Option<ToolRegistry>,
    retriever: Option<ContentRetriever>,
    max_tool_rounds: usize,
}

impl AssistantBuilder {
    /// Conversation memory; defaults to a 10-message window.
    pub fn memory(mut self, memory: impl ChatMemory + 'static) -> Self {
        self.memory = Some(Box::new(memory));
        self
    }

    /// System prompt prepended to every provider call.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Tools offered to the model on each turn.
    pub fn tools(mut self, registry: ToolRegistry) -> Self {
        self.tools = Some(registry);
        self
    }

    /// Retriever used to augment user turns with relevant context.
    pub fn retriever(mut self, retriever: ContentRetriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Cap on tool rounds within one turn (default 4).
    pub fn max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn build(self) -> Result<Assistant, CoreError> {
        let memory = match self.memory {
            Some(memory) => memory,
            None => Box::new(MessageWindowMemory::new(DEFAULT_WINDOW)?),
        };
        Ok(Assistant {
            provider: self.provider,
            memory,
            system_prompt: self.system_prompt,
            tools: self.tools,
            retriever: self.retriever,
            max_tool_rounds: self.max_tool_rounds,
        })
    }
}

/// A stateful conversational assistant.
///
/// Each assistant owns its memory exclusively; continuity across turns
/// comes from replaying the memory window to the stateless provider.
pub struct Assistant {
    provider: Arc<dyn ChatProvider>,
    memory: Box<dyn ChatMemory>,
    system_prompt: Option<String>,
    tools: Option<ToolRegistry>,
    retriever: Option<ContentRetriever>,
    max_tool_rounds: usize,
}

impl Assistant {
    pub fn builder(provider: Arc<dyn ChatProvider>) -> AssistantBuilder {
        AssistantBuilder {
            provider,
            memory: None,
            system_prompt: None,
            tools: None,
            retriever: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Run one conversation turn and return the assistant reply.
    pub async fn chat(&mut self, user_text: &str) -> Result<String, CoreError> {
        let user_text = self.augment(user_text).await?;
        self.memory.add(ChatMessage::user(user_text));
        let messages = self.context_messages();

        let reply = match &self.tools {
            Some(registry) if !registry.is_empty() => {
                self.run_tool_rounds(&messages, registry).await?
            }
            _ => {
                let response = self.provider.chat(&messages).await?;
                response.message.text
            }
        };

        self.memory.add(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    /// Run one turn as a stream, invoking `on_delta` per fragment.
    ///
    /// The concatenated stream text is what gets remembered and
    /// returned. Tools are not offered on streamed turns.
    pub async fn chat_stream<F>(
        &mut self,
        user_text: &str,
        mut on_delta: F,
    ) -> Result<String, CoreError>
    where
        F: FnMut(&StreamDelta),
    {
        let user_text = self.augment(user_text).await?;
        self.memory.add(ChatMessage::user(user_text));
        let messages = self.context_messages();

        let mut stream = self.provider.chat_stream(&messages).await?;
        let mut reply = String::new();
        while let Some(delta) = stream.next().await {
            let delta = delta?;
            reply.push_str(&delta.text);
            on_delta(&delta);
        }

        self.memory.add(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    /// Read view of the conversation window.
    pub fn history(&self) -> &[ChatMessage] {
        self.memory.messages()
    }

    /// Forget the conversation so far.
    pub fn reset(&mut self) {
        self.memory.clear();
    }

    async fn augment(&self, user_text: &str) -> Result<String, CoreError> {
        let Some(retriever) = &self.retriever else {
            return Ok(user_text.to_string());
        };
        let matches = retriever.retrieve(user_text).await?;
        if matches.is_empty() {
            return Ok(user_text.to_string());
        }
        let mut augmented = String::from(user_text);
        augmented.push_str("\n\nAnswer using the following information:");
        for entry in &matches {
            augmented.push('\n');
            augmented.push_str(&entry.segment.text);
        }
        Ok(augmented)
    }

    fn context_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.memory.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(ChatMessage::system(prompt.clone()));
        }
        messages.extend_from_slice(self.memory.messages());
        messages
    }

    async fn run_tool_rounds(
        &self,
        messages: &[ChatMessage],
        registry: &ToolRegistry,
    ) -> Result<String, CoreError> {
        let specs = registry.specs();
        let mut exchanges: Vec<ToolExchange> = Vec::new();
        loop {
            let response = self
                .provider
                .chat_with_tools(messages, &specs, &exchanges)
                .await?;
            if response.tool_calls.is_empty() {
                return Ok(response.message.text);
            }
            if exchanges.len() == self.max_tool_rounds {
                return Err(CoreError::ToolRoundsExhausted(self.max_tool_rounds));
            }

            let mut outcomes = Vec::with_capacity(response.tool_calls.len());
            for call in &response.tool_calls {
                let result = self.execute_call(registry, call).await;
                outcomes.push(ToolOutcome {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    result,
                });
            }
            exchanges.push(ToolExchange {
                calls: response.tool_calls,
                outcomes,
            });
        }
    }

    /// Execute one requested call; failures become error payloads the
    /// model sees on the next round rather than aborting the turn.
    async fn execute_call(&self, registry: &ToolRegistry, call: &ToolCall) -> Value {
        match self.dispatch(registry, call).await {
            Ok(value) => value,
            Err(err) => {
                warn!("tool `{}` failed: {err}", call.name);
                json!({ "error": err.to_string() })
            }
        }
    }

    async fn dispatch(
        &self,
        registry: &ToolRegistry,
        call: &ToolCall,
    ) -> Result<Value, ToolError> {
        let tool = registry
            .get(&call.name)
            .ok_or_else(|| ToolError::ToolNotFound(call.name.clone()))?;
        debug!("dispatching tool `{}`", call.name);
        tool.call(call.arguments.clone()).await
    }
}
