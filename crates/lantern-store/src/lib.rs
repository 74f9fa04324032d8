//! Embedding generation and similarity retrieval.
//!
//! The store trait is the seam external vector databases implement; the
//! in-memory store is the reference implementation used for tests and
//! small corpora.

pub mod embedding;
pub mod error;
pub mod retriever;
pub mod splitter;
pub mod store;

/// Embedding model interface and the OpenAI implementation.
pub use embedding::{EmbeddingModel, OpenAiEmbeddingModel, DEFAULT_EMBEDDING_MODEL};
/// Store error type.
pub use error::StoreError;
/// Query-time retriever combining a store and an embedder.
pub use retriever::ContentRetriever;
/// Recursive character splitter.
pub use splitter::split_recursive;
/// Store interface, in-memory implementation, and result types.
pub use store::{EmbeddingStore, InMemoryEmbeddingStore, ScoredMatch, TextSegment};
