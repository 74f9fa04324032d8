//! Error types for embedding and retrieval.

/// Errors returned by embedding models and stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No API key was configured or found in the environment.
    #[error("missing API key: set OPENAI_API_KEY or pass one explicitly")]
    MissingApiKey,
    /// The embedding provider reported a failure.
    #[error("embedding provider error: {0}")]
    Provider(#[from] async_openai::error::OpenAIError),
    /// The provider returned a different number of vectors than requested.
    #[error("embedding count mismatch: requested {requested}, received {received}")]
    CountMismatch { requested: usize, received: usize },
    /// A query vector had a different dimension than stored vectors.
    #[error("dimension mismatch: query has {query}, store has {stored}")]
    DimensionMismatch { query: usize, stored: usize },
    /// Splitter parameters are inconsistent.
    #[error("invalid split parameters: max_chars {max_chars} must be positive and above overlap {overlap}")]
    InvalidSplitParams { max_chars: usize, overlap: usize },
}
