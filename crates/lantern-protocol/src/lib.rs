//! Shared wire types for Lantern conversations, tool calls, and tool specs.

mod tool;

pub use tool::ToolError;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Speaker role for a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-authored instruction.
    System,
    /// User-authored message.
    User,
    /// Assistant-authored reply.
    Assistant,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable conversation turn.
///
/// `sequence` records admission order and is assigned by the memory that
/// accepts the message; freshly constructed messages carry sequence 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Role that produced the message.
    pub role: Role,
    /// Message text.
    pub text: String,
    /// Monotonic admission order within a memory instance.
    pub sequence: u64,
}

impl ChatMessage {
    /// Create a message with an explicit role.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sequence: 0,
        }
    }

    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Return a copy carrying the given sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}

/// Reason a completion stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop.
    Stop,
    /// Token limit reached.
    Length,
    /// Model requested tool calls.
    ToolCalls,
    /// Provider filtered the content.
    ContentFilter,
    /// Provider-specific reason not modeled here.
    Other,
}

/// A model-initiated tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back with the outcome.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// JSON arguments for the call.
    pub arguments: Value,
}

/// The result of executing a tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolOutcome {
    /// Call id this outcome answers.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// JSON result payload.
    pub result: Value,
}

/// One completed round of tool calls and their outcomes within a turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolExchange {
    /// Calls the model requested.
    pub calls: Vec<ToolCall>,
    /// Outcomes produced for those calls, in the same order.
    pub outcomes: Vec<ToolOutcome>,
}

/// Tool metadata presented to the model for discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSpec {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON schema for tool arguments.
    pub args_schema: Value,
}

#[cfg(test)]
mod tests {
    use super::{ChatMessage, Role};
    use pretty_assertions::assert_eq;

    #[test]
    fn roles_round_trip_through_serde() {
        let message = ChatMessage::user("hello");
        let json = serde_json::to_string(&message).expect("serialize");
        assert!(json.contains("\"role\":\"user\""));
        let back: ChatMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, message);
    }

    #[test]
    fn constructors_leave_sequence_unassigned() {
        assert_eq!(ChatMessage::system("s").sequence, 0);
        assert_eq!(ChatMessage::assistant("a").sequence, 0);
        assert_eq!(ChatMessage::user("u").with_sequence(7).sequence, 7);
    }

    #[test]
    fn role_parses_from_lowercase() {
        assert_eq!("assistant".parse::<Role>(), Ok(Role::Assistant));
        assert!("robot".parse::<Role>().is_err());
    }
}
