//! Hash-based deterministic embedding model

use crate::{EmbeddingError, EmbeddingModel};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic hash-based embedding model.
///
/// Hashes the input text with per-dimension seeds to produce pseudo-random
/// but fully deterministic unit-length vectors. This gives the pipeline a
/// model with zero download footprint; a real sentence-transformer backend
/// plugs in behind the same [`EmbeddingModel`] trait.
///
/// The embeddings are:
///
/// - **Deterministic**: same text always produces the same vector
/// - **Normalized**: unit length, so cosine similarity is a dot product
/// - **Diverse**: different texts produce different vectors
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a new hash embedder
    ///
    /// # Parameters
    ///
    /// - `dimension`: the embedding dimension (e.g. 384)
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Hash text with a seed to get a deterministic f32 value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

impl EmbeddingModel for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            embedding.push(Self::hash_with_seed(text, i as u64));
        }

        // Normalize to unit length for cosine similarity
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
