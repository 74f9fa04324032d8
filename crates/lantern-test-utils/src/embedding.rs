use async_trait::async_trait;
use lantern_store::{EmbeddingModel, StoreError};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Deterministic offline embedder for retrieval tests.
///
/// Each whitespace token is hashed into one dimension of a fixed-size
/// vector, then the vector is L2-normalized. Texts sharing tokens get
/// similar embeddings, which is enough to exercise ranking without a
/// live model.
#[derive(Debug, Clone)]
pub struct HashEmbeddingModel {
    dimensions: usize,
}

impl HashEmbeddingModel {
    pub fn new(dimensions: usize) -> Self {
        assert!(dimensions > 0, "dimensions must be positive");
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            let bucket = (hasher.finish() as usize) % self.dimensions;
            vector[bucket] += 1.0;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashEmbeddingModel {
    fn default() -> Self {
        Self::new(16)
    }
}

#[async_trait]
impl EmbeddingModel for HashEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, StoreError> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
