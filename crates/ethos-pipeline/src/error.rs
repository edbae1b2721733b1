//! Pipeline error types

use ethos_retriever::RetrieverError;
use thiserror::Error;

/// Errors from the advisory pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Retrieval error
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrieverError),

    /// Generation backend failure (not a timeout; timeouts flag the artifact)
    #[error("Generation error: {0}")]
    Generation(String),

    /// A background task failed to complete
    #[error("Task error: {0}")]
    Task(String),
}
