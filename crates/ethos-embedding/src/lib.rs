//! Ethos Embedding Layer
//!
//! Text-to-vector conversion and similarity computation for the relevance
//! engine.
//!
//! # Architecture
//!
//! - **HashEmbedder**: hash-based deterministic embeddings, the shippable
//!   default; real model integrations implement the same trait
//! - **CachingEmbedder**: wraps any model with an explicit, concurrency-safe,
//!   text-keyed cache - no ambient global caches
//! - **similarity**: cosine similarity plus the sigmoid normalization the
//!   downstream weighting depends on
//!
//! # Examples
//!
//! ```
//! use ethos_embedding::{EmbeddingModel, HashEmbedder};
//!
//! let model = HashEmbedder::new(384);
//! let embedding = model.embed("The sky is blue").unwrap();
//! assert_eq!(embedding.len(), 384);
//!
//! // Same text always produces the same embedding
//! assert_eq!(embedding, model.embed("The sky is blue").unwrap());
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod model;
pub mod similarity;

pub use cache::{CachingEmbedder, EmbeddingCache};
pub use model::HashEmbedder;
pub use similarity::{cosine_similarity, normalized_similarity};

use thiserror::Error;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model inference error
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),
}

/// Trait for embedding models
///
/// Embedding generation must be side-effect-free: the same text always yields
/// the same vector, which is what makes text-level caching sound.
pub trait EmbeddingModel: Send + Sync {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;
}
