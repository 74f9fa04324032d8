//! Conversation driver integration tests.

use lantern_core::{Assistant, CoreError};
use lantern_memory::MessageWindowMemory;
use lantern_protocol::{Role, ToolCall};
use lantern_test_utils::{
    FailingChatProvider, FixedChatProvider, RecordingChatProvider, StreamingChatProvider,
};
use lantern_tools::builtins::calculator_tools;
use lantern_tools::ToolRegistry;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn texts(messages: &[lantern_protocol::ChatMessage]) -> Vec<&str> {
    messages.iter().map(|m| m.text.as_str()).collect()
}

/// Every turn replays the prior conversation to the provider.
#[tokio::test]
async fn replays_prior_turns_to_the_provider() {
    let provider = RecordingChatProvider::new("ok");
    let mut assistant = Assistant::builder(Arc::new(provider.clone()))
        .build()
        .expect("build assistant");

    assistant.chat("first").await.expect("first turn");
    assistant.chat("second").await.expect("second turn");

    let calls = provider.calls.lock();
    assert_eq!(texts(&calls[0]), vec!["first"]);
    assert_eq!(texts(&calls[1]), vec!["first", "ok", "second"]);
}

/// The system prompt leads the context on every call without being stored.
#[tokio::test]
async fn system_prompt_is_prepended_to_every_call() {
    let provider = RecordingChatProvider::new("ok");
    let mut assistant = Assistant::builder(Arc::new(provider.clone()))
        .system_prompt("You always answer in rhyme.")
        .build()
        .expect("build assistant");

    assistant.chat("hello").await.expect("turn");
    assistant.chat("again").await.expect("turn");

    let calls = provider.calls.lock();
    assert_eq!(calls[1][0].role, Role::System);
    assert_eq!(calls[1][0].text, "You always answer in rhyme.");
    // The stored history holds only the conversation itself.
    assert_eq!(assistant.history().len(), 4);
    assert_eq!(assistant.history()[0].role, Role::User);
}

/// A small window drops the oldest turns from the provider's context.
#[tokio::test]
async fn window_eviction_limits_provider_context() {
    let provider = RecordingChatProvider::new("ok");
    let memory = MessageWindowMemory::new(2).expect("memory");
    let mut assistant = Assistant::builder(Arc::new(provider.clone()))
        .memory(memory)
        .build()
        .expect("build assistant");

    assistant.chat("one").await.expect("turn");
    assistant.chat("two").await.expect("turn");

    let calls = provider.calls.lock();
    // By the second call, "one" has been evicted by its own reply.
    assert_eq!(texts(&calls[1]), vec!["ok", "two"]);
}

/// Tool outcomes from one round are replayed on the next provider call.
#[tokio::test]
async fn tool_round_feeds_outcomes_back() {
    let provider = RecordingChatProvider::new("unused")
        .script_tool_calls(vec![ToolCall {
            id: "call_1".to_string(),
            name: "add".to_string(),
            arguments: json!({"a": 2.0, "b": 3.0}),
        }])
        .script_text("2 + 3 = 5");
    let registry = ToolRegistry::new();
    registry.register_all(calculator_tools());
    let mut assistant = Assistant::builder(Arc::new(provider.clone()))
        .tools(registry)
        .build()
        .expect("build assistant");

    let reply = assistant.chat("what is 2 + 3?").await.expect("turn");

    assert_eq!(reply, "2 + 3 = 5");
    let exchanges = provider.seen_exchanges.lock();
    assert_eq!(exchanges[0].len(), 0);
    assert_eq!(exchanges[1].len(), 1);
    assert_eq!(exchanges[1][0].outcomes[0].name, "add");
    assert_eq!(exchanges[1][0].outcomes[0].result, json!({"result": 5.0}));
    // The reply, not the tool round, is what memory keeps.
    assert_eq!(assistant.history().len(), 2);
    assert_eq!(assistant.history()[1].text, "2 + 3 = 5");
}

/// Requests for unregistered tools surface to the model as error payloads.
#[tokio::test]
async fn unknown_tool_becomes_an_error_payload() {
    let provider = RecordingChatProvider::new("unused")
        .script_tool_calls(vec![ToolCall {
            id: "call_1".to_string(),
            name: "launch_rocket".to_string(),
            arguments: json!({}),
        }])
        .script_text("I cannot do that.");
    let registry = ToolRegistry::new();
    registry.register_all(calculator_tools());
    let mut assistant = Assistant::builder(Arc::new(provider.clone()))
        .tools(registry)
        .build()
        .expect("build assistant");

    let reply = assistant.chat("launch a rocket").await.expect("turn");

    assert_eq!(reply, "I cannot do that.");
    let exchanges = provider.seen_exchanges.lock();
    assert_eq!(
        exchanges[1][0].outcomes[0].result,
        json!({"error": "tool not found: launch_rocket"})
    );
}

/// A model that never stops calling tools hits the round limit.
#[tokio::test]
async fn tool_rounds_limit_is_enforced() {
    let call = ToolCall {
        id: "call_1".to_string(),
        name: "add".to_string(),
        arguments: json!({"a": 1.0, "b": 1.0}),
    };
    let provider = RecordingChatProvider::new("unused")
        .script_tool_calls(vec![call.clone()])
        .script_tool_calls(vec![call]);
    let registry = ToolRegistry::new();
    registry.register_all(calculator_tools());
    let mut assistant = Assistant::builder(Arc::new(provider.clone()))
        .tools(registry)
        .max_tool_rounds(1)
        .build()
        .expect("build assistant");

    let result = assistant.chat("loop forever").await;

    assert!(matches!(result, Err(CoreError::ToolRoundsExhausted(1))));
}

/// Streamed turns are remembered as their concatenated text.
#[tokio::test]
async fn streamed_turn_is_remembered_whole() {
    let provider = StreamingChatProvider::new(vec!["Hel".to_string(), "lo".to_string()]);
    let mut assistant = Assistant::builder(Arc::new(provider))
        .build()
        .expect("build assistant");

    let mut seen = Vec::new();
    let reply = assistant
        .chat_stream("greet me", |delta| seen.push(delta.text.clone()))
        .await
        .expect("stream turn");

    assert_eq!(reply, "Hello");
    assert_eq!(seen, vec!["Hel", "lo", ""]);
    assert_eq!(assistant.history()[1].text, "Hello");
}

/// Provider failures propagate as llm errors.
#[tokio::test]
async fn provider_failure_propagates() {
    let mut assistant = Assistant::builder(Arc::new(FailingChatProvider::new()))
        .build()
        .expect("build assistant");

    let result = assistant.chat("hello").await;

    assert!(matches!(result, Err(CoreError::Llm(_))));
}

/// Reset forgets the conversation entirely.
#[tokio::test]
async fn reset_clears_history() {
    let mut assistant = Assistant::builder(Arc::new(FixedChatProvider::new("ok")))
        .build()
        .expect("build assistant");

    assistant.chat("hello").await.expect("turn");
    assert_eq!(assistant.history().len(), 2);

    assistant.reset();
    assert!(assistant.history().is_empty());
}
