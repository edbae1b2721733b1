//! Retriever error types

use ethos_embedding::EmbeddingError;
use thiserror::Error;

/// Errors that can occur during scoring and retrieval
#[derive(Error, Debug)]
pub enum RetrieverError {
    /// Configuration error (fatal at construction)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Embedding the target section failed
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}
