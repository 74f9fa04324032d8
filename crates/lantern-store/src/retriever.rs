//! Query-time content retrieval over an embedding store.

use crate::embedding::EmbeddingModel;
use crate::store::{EmbeddingStore, ScoredMatch};
use crate::StoreError;
use log::debug;
use std::sync::Arc;

/// Default result count per query.
const DEFAULT_MAX_RESULTS: usize = 3;

/// Retrieves the segments most similar to a text query.
///
/// Embeds the query with the configured model and searches the store,
/// applying the retriever's result bound and score floor.
#[derive(Clone)]
pub struct ContentRetriever {
    store: Arc<dyn EmbeddingStore>,
    embedder: Arc<dyn EmbeddingModel>,
    max_results: usize,
    min_score: f32,
}

impl ContentRetriever {
    /// Create a retriever with default limits (3 results, no score floor).
    pub fn new(store: Arc<dyn EmbeddingStore>, embedder: Arc<dyn EmbeddingModel>) -> Self {
        Self {
            store,
            embedder,
            max_results: DEFAULT_MAX_RESULTS,
            min_score: 0.0,
        }
    }

    /// Cap on results per query.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Minimum similarity score for a result to be returned.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Retrieve segments relevant to `query`, best first.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredMatch>, StoreError> {
        let embedding = self.embedder.embed(query).await?;
        let matches = self
            .store
            .search(&embedding, self.max_results, self.min_score)
            .await?;
        debug!(
            "retrieved {} segment(s) for query of {} chars",
            matches.len(),
            query.len()
        );
        Ok(matches)
    }
}
