//! Embedding model interface and the OpenAI-backed implementation.

use crate::StoreError;
use async_openai::config::OpenAIConfig;
use async_openai::types::CreateEmbeddingRequestArgs;
use async_openai::Client;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Generate an embedding vector for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, StoreError>;

    /// Generate embedding vectors for multiple texts in a single call.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError>;
}

/// Embedding model backed by the OpenAI embeddings API.
#[derive(Clone)]
pub struct OpenAiEmbeddingModel {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiEmbeddingModel {
    /// Create a model reading the key from `OPENAI_API_KEY` when `api_key`
    /// is empty.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, StoreError> {
        let api_key = api_key.into();
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").map_err(|_| StoreError::MissingApiKey)?
        } else {
            api_key
        };
        Ok(Self {
            client: Arc::new(Client::with_config(
                OpenAIConfig::new().with_api_key(api_key),
            )),
            model: model.into(),
        })
    }

    /// Create a model using [`DEFAULT_EMBEDDING_MODEL`].
    pub fn default_model(api_key: impl Into<String>) -> Result<Self, StoreError> {
        Self::new(api_key, DEFAULT_EMBEDDING_MODEL)
    }
}

#[async_trait]
impl EmbeddingModel for OpenAiEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, StoreError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors.pop().ok_or(StoreError::CountMismatch {
            requested: 1,
            received: 0,
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(texts.to_vec())
            .build()?;
        let response = self.client.embeddings().create(request).await?;
        if response.data.len() != texts.len() {
            return Err(StoreError::CountMismatch {
                requested: texts.len(),
                received: response.data.len(),
            });
        }
        debug!(
            "embedded {} text(s) (model={})",
            texts.len(),
            self.model
        );
        Ok(response.data.into_iter().map(|item| item.embedding).collect())
    }
}
