//! Error types for chat providers.

/// Errors returned by chat providers.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key was configured or found in the environment.
    #[error("missing API key: set OPENAI_API_KEY or pass one explicitly")]
    MissingApiKey,
    /// The provider SDK reported a transport or API failure.
    #[error("provider error: {0}")]
    Provider(#[from] async_openai::error::OpenAIError),
    /// The provider returned no choices or empty content.
    #[error("empty completion from provider")]
    EmptyCompletion,
    /// A structured payload could not be produced.
    #[error("malformed structured payload: {0}")]
    MalformedPayload(String),
}
