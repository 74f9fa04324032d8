//! Chat completion provider seam and the OpenAI-backed implementation.
//!
//! The trait is the boundary the rest of Lantern programs against; the
//! transport behind it belongs to the provider and its SDK.

pub mod error;
pub mod openai;
pub mod provider;

/// LLM error type.
pub use error::LlmError;
/// OpenAI-backed chat model and its builder.
pub use openai::{DEFAULT_MODEL, OpenAiChatModel, OpenAiChatModelBuilder};
/// Provider interface and response types.
pub use provider::{ChatProvider, ChatResponse, ChatStream, StreamDelta};
