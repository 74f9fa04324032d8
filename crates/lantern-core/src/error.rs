//! Error types for the conversation driver.

use lantern_llm::LlmError;
use lantern_memory::MemoryError;
use lantern_store::StoreError;
use thiserror::Error;

/// Errors returned by driver operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Conversation memory error.
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),
    /// Provider error.
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),
    /// Retrieval error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// A template placeholder had no value supplied.
    #[error("no value for template placeholder `{0}`")]
    MissingTemplateValue(String),
    /// A structured reply did not decode into the requested type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The model kept requesting tools past the round limit.
    #[error("tool rounds exhausted after {0} round(s)")]
    ToolRoundsExhausted(usize),
}
