//! OpenAI-backed chat provider over the async-openai SDK.

use crate::provider::{ChatProvider, ChatResponse, ChatStream, StreamDelta};
use crate::LlmError;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType,
    CreateChatCompletionRequestArgs, FinishReason as OpenAiFinishReason, FunctionCall,
    FunctionObjectArgs, ResponseFormat,
};
use async_openai::Client;
use async_trait::async_trait;
use futures_util::StreamExt;
use lantern_protocol::{ChatMessage, FinishReason, Role, ToolCall, ToolExchange, ToolSpec};
use log::debug;
use std::sync::Arc;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Chat provider backed by the OpenAI chat completions API.
#[derive(Clone)]
pub struct OpenAiChatModel {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    temperature: Option<f32>,
}

/// Builder for [`OpenAiChatModel`].
#[derive(Debug, Default)]
pub struct OpenAiChatModelBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
}

impl OpenAiChatModelBuilder {
    /// Set the API key explicitly instead of reading `OPENAI_API_KEY`.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point at an OpenAI-compatible endpoint instead of the default API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Chat model name (default [`DEFAULT_MODEL`]).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the model, failing fast when no API key is available.
    pub fn build(self) -> Result<OpenAiChatModel, LlmError> {
        let api_key = match self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => std::env::var("OPENAI_API_KEY").map_err(|_| LlmError::MissingApiKey)?,
        };
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base_url) = self.base_url {
            config = config.with_api_base(base_url);
        }
        Ok(OpenAiChatModel {
            client: Arc::new(Client::with_config(config)),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature,
        })
    }
}

impl OpenAiChatModel {
    /// Start building a model.
    pub fn builder() -> OpenAiChatModelBuilder {
        OpenAiChatModelBuilder::default()
    }

    /// Model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_messages(
        messages: &[ChatMessage],
        exchanges: &[ToolExchange],
    ) -> Result<Vec<ChatCompletionRequestMessage>, LlmError> {
        let mut request = Vec::with_capacity(messages.len());
        for message in messages {
            request.push(to_request_message(message)?);
        }
        for exchange in exchanges {
            request.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(
                        exchange
                            .calls
                            .iter()
                            .map(to_request_tool_call)
                            .collect::<Vec<_>>(),
                    )
                    .build()?
                    .into(),
            );
            for outcome in &exchange.outcomes {
                request.push(
                    ChatCompletionRequestToolMessageArgs::default()
                        .content(outcome.result.to_string())
                        .tool_call_id(outcome.id.clone())
                        .build()?
                        .into(),
                );
            }
        }
        Ok(request)
    }

    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        tools: Vec<ChatCompletionTool>,
        json_mode: bool,
    ) -> Result<ChatResponse, LlmError> {
        let mut request = CreateChatCompletionRequestArgs::default();
        request.model(&self.model).messages(messages);
        if let Some(temperature) = self.temperature {
            request.temperature(temperature);
        }
        if !tools.is_empty() {
            request.tools(tools);
        }
        if json_mode {
            request.response_format(ResponseFormat::JsonObject);
        }
        let response = self.client.chat().create(request.build()?).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyCompletion)?;
        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(from_response_tool_call)
            .collect::<Vec<_>>();
        let text = choice.message.content.unwrap_or_default();
        if text.is_empty() && tool_calls.is_empty() {
            return Err(LlmError::EmptyCompletion);
        }
        debug!(
            "chat completion (model={}, tool_calls={})",
            self.model,
            tool_calls.len()
        );
        Ok(ChatResponse {
            message: ChatMessage::assistant(text),
            tool_calls,
            finish_reason: choice
                .finish_reason
                .map(map_finish_reason)
                .unwrap_or(FinishReason::Other),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatModel {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        let request = Self::request_messages(messages, &[])?;
        self.complete(request, Vec::new(), false).await
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        exchanges: &[ToolExchange],
    ) -> Result<ChatResponse, LlmError> {
        let request = Self::request_messages(messages, exchanges)?;
        let tools = tools
            .iter()
            .map(to_request_tool)
            .collect::<Result<Vec<_>, _>>()?;
        self.complete(request, tools, false).await
    }

    async fn chat_stream(&self, messages: &[ChatMessage]) -> Result<ChatStream, LlmError> {
        let mut request = CreateChatCompletionRequestArgs::default();
        request
            .model(&self.model)
            .messages(Self::request_messages(messages, &[])?);
        if let Some(temperature) = self.temperature {
            request.temperature(temperature);
        }
        let stream = self.client.chat().create_stream(request.build()?).await?;

        let deltas = stream
            .map(|result| match result {
                Ok(chunk) => {
                    let (text, finish_reason) = match chunk.choices.into_iter().next() {
                        Some(choice) => (
                            choice.delta.content.unwrap_or_default(),
                            choice.finish_reason.map(map_finish_reason),
                        ),
                        None => (String::new(), None),
                    };
                    Ok(StreamDelta {
                        text,
                        finish_reason,
                    })
                }
                Err(err) => Err(LlmError::Provider(err)),
            })
            .filter(|delta| {
                let keep = match delta {
                    Ok(delta) => !delta.text.is_empty() || delta.finish_reason.is_some(),
                    Err(_) => true,
                };
                futures_util::future::ready(keep)
            });
        Ok(Box::pin(deltas))
    }

    async fn chat_json(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request = Self::request_messages(messages, &[])?;
        let response = self.complete(request, Vec::new(), true).await?;
        if response.message.text.is_empty() {
            return Err(LlmError::MalformedPayload(
                "provider returned no JSON content".to_string(),
            ));
        }
        Ok(response.message.text)
    }
}

fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage, LlmError> {
    let request = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.text.clone())
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.text.clone())
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.text.clone())
            .build()?
            .into(),
    };
    Ok(request)
}

fn to_request_tool(spec: &ToolSpec) -> Result<ChatCompletionTool, LlmError> {
    Ok(ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(
            FunctionObjectArgs::default()
                .name(spec.name.clone())
                .description(spec.description.clone())
                .parameters(spec.args_schema.clone())
                .build()?,
        )
        .build()?)
}

fn to_request_tool_call(call: &ToolCall) -> ChatCompletionMessageToolCall {
    ChatCompletionMessageToolCall {
        id: call.id.clone(),
        r#type: ChatCompletionToolType::Function,
        function: FunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.to_string(),
        },
    }
}

fn from_response_tool_call(call: ChatCompletionMessageToolCall) -> ToolCall {
    let arguments = serde_json::from_str(&call.function.arguments)
        .unwrap_or(serde_json::Value::String(call.function.arguments));
    ToolCall {
        id: call.id,
        name: call.function.name,
        arguments,
    }
}

fn map_finish_reason(reason: OpenAiFinishReason) -> FinishReason {
    match reason {
        OpenAiFinishReason::Stop => FinishReason::Stop,
        OpenAiFinishReason::Length => FinishReason::Length,
        OpenAiFinishReason::ToolCalls => FinishReason::ToolCalls,
        OpenAiFinishReason::ContentFilter => FinishReason::ContentFilter,
        OpenAiFinishReason::FunctionCall => FinishReason::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::{from_response_tool_call, map_finish_reason, OpenAiChatModel};
    use async_openai::types::{
        ChatCompletionMessageToolCall, ChatCompletionToolType,
        FinishReason as OpenAiFinishReason, FunctionCall,
    };
    use lantern_protocol::FinishReason;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn builder_without_key_or_env_fails() {
        // Scoped: only meaningful when the environment has no key.
        if std::env::var("OPENAI_API_KEY").is_ok() {
            return;
        }
        assert!(OpenAiChatModel::builder().build().is_err());
    }

    #[test]
    fn builder_uses_default_model() {
        let model = OpenAiChatModel::builder()
            .api_key("sk-test")
            .build()
            .expect("build");
        assert_eq!(model.model(), super::DEFAULT_MODEL);
    }

    #[test]
    fn tool_call_arguments_parse_as_json() {
        let call = from_response_tool_call(ChatCompletionMessageToolCall {
            id: "call_1".to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: "add".to_string(),
                arguments: "{\"a\":2,\"b\":3}".to_string(),
            },
        });
        assert_eq!(call.arguments, json!({"a": 2, "b": 3}));
    }

    #[test]
    fn unparsable_arguments_survive_as_strings() {
        let call = from_response_tool_call(ChatCompletionMessageToolCall {
            id: "call_2".to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: "add".to_string(),
                arguments: "not json".to_string(),
            },
        });
        assert_eq!(call.arguments, json!("not json"));
    }

    #[test]
    fn finish_reasons_map_onto_protocol() {
        assert_eq!(map_finish_reason(OpenAiFinishReason::Stop), FinishReason::Stop);
        assert_eq!(
            map_finish_reason(OpenAiFinishReason::ToolCalls),
            FinishReason::ToolCalls
        );
    }
}
