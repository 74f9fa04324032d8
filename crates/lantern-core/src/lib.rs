//! Conversation driver: stateful assistants over stateless providers.
//!
//! An [`Assistant`] owns a bounded memory window, replays it to a
//! [`lantern_llm::ChatProvider`] on every turn, and optionally routes
//! tool calls and retrieval augmentation through the same loop.

pub mod assistant;
pub mod error;
pub mod extract;
pub mod template;

/// Conversation driver and its builder.
pub use assistant::{Assistant, AssistantBuilder};
/// Core error type.
pub use error::CoreError;
/// Typed extraction helper.
pub use extract::extract;
/// Prompt templating.
pub use template::{PromptTemplate, TemplateValues};
