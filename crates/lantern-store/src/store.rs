//! Embedding store interface and the in-memory implementation.

use crate::StoreError;
use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A chunk of text carried through embedding and retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    /// Segment text.
    pub text: String,
    /// Arbitrary metadata attached at ingestion time.
    pub metadata: Value,
}

impl TextSegment {
    /// Create a segment with empty metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Value::Null,
        }
    }

    /// Attach metadata to the segment.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// One retrieval result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    /// Store-assigned id of the entry.
    pub id: Uuid,
    /// Cosine similarity against the query, in `[-1, 1]`.
    pub score: f32,
    /// The matched segment.
    pub segment: TextSegment,
}

/// Interface for vector similarity stores.
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    /// Add an embedded segment; returns the assigned id.
    async fn add(&self, embedding: Vec<f32>, segment: TextSegment) -> Result<Uuid, StoreError>;

    /// Return up to `max_results` entries scoring at least `min_score`
    /// against the query vector, ranked by descending similarity.
    async fn search(
        &self,
        query: &[f32],
        max_results: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredMatch>, StoreError>;
}

/// In-memory embedding store for tests, development, and small corpora.
///
/// Entries are gone when the store is dropped; durable stores implement
/// the same trait against an external service.
#[derive(Default, Clone)]
pub struct InMemoryEmbeddingStore {
    entries: Arc<RwLock<HashMap<Uuid, (Vec<f32>, TextSegment)>>>,
}

impl InMemoryEmbeddingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Cosine similarity between two vectors; zero-norm vectors score 0.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl EmbeddingStore for InMemoryEmbeddingStore {
    async fn add(&self, embedding: Vec<f32>, segment: TextSegment) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.entries.write().insert(id, (embedding, segment));
        Ok(id)
    }

    async fn search(
        &self,
        query: &[f32],
        max_results: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredMatch>, StoreError> {
        let entries = self.entries.read();
        let mut matches = Vec::new();
        for (id, (embedding, segment)) in entries.iter() {
            if embedding.len() != query.len() {
                return Err(StoreError::DimensionMismatch {
                    query: query.len(),
                    stored: embedding.len(),
                });
            }
            let score = Self::cosine_similarity(query, embedding);
            if score >= min_score {
                matches.push(ScoredMatch {
                    id: *id,
                    score,
                    segment: segment.clone(),
                });
            }
        }
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        matches.truncate(max_results);
        debug!(
            "similarity search returned {} match(es) (max={max_results}, min_score={min_score})",
            matches.len()
        );
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::{EmbeddingStore, InMemoryEmbeddingStore, TextSegment};
    use crate::StoreError;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let store = InMemoryEmbeddingStore::new();
        store
            .add(vec![1.0, 0.0], TextSegment::new("east"))
            .await
            .expect("add");
        store
            .add(vec![0.0, 1.0], TextSegment::new("north"))
            .await
            .expect("add");
        store
            .add(vec![0.7, 0.7], TextSegment::new("northeast"))
            .await
            .expect("add");

        let matches = store.search(&[1.0, 0.0], 2, 0.0).await.expect("search");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].segment.text, "east");
        assert_eq!(matches[1].segment.text, "northeast");
        assert!(matches[0].score > matches[1].score);
    }

    #[tokio::test]
    async fn min_score_filters_matches() {
        let store = InMemoryEmbeddingStore::new();
        store
            .add(vec![1.0, 0.0], TextSegment::new("east"))
            .await
            .expect("add");
        store
            .add(vec![-1.0, 0.0], TextSegment::new("west"))
            .await
            .expect("add");

        let matches = store.search(&[1.0, 0.0], 10, 0.5).await.expect("search");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].segment.text, "east");
    }

    #[tokio::test]
    async fn dimension_mismatch_is_reported() {
        let store = InMemoryEmbeddingStore::new();
        store
            .add(vec![1.0, 0.0, 0.0], TextSegment::new("3d"))
            .await
            .expect("add");
        let err = store.search(&[1.0, 0.0], 1, 0.0).await.expect_err("fail");
        assert!(matches!(err, StoreError::DimensionMismatch { .. }));
    }

    #[tokio::test]
    async fn zero_norm_vectors_score_zero() {
        let store = InMemoryEmbeddingStore::new();
        store
            .add(vec![0.0, 0.0], TextSegment::new("null"))
            .await
            .expect("add");
        let matches = store.search(&[1.0, 0.0], 1, 0.0).await.expect("search");
        assert_eq!(matches[0].score, 0.0);
    }
}
