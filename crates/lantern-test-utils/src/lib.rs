//! Test helpers shared across Lantern crates.

pub mod embedding;
pub mod llm;

pub use embedding::HashEmbeddingModel;
pub use llm::{
    FailingChatProvider, FixedChatProvider, RecordingChatProvider, ScriptedReply,
    StreamingChatProvider,
};
