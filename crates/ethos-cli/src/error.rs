//! CLI error types

use thiserror::Error;

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the command line
#[derive(Debug, Error)]
pub enum CliError {
    /// Pipeline error
    #[error("{0}")]
    Pipeline(#[from] ethos_pipeline::PipelineError),

    /// Parser configuration error
    #[error("{0}")]
    Parser(#[from] ethos_parser::ParserError),

    /// Retriever error
    #[error("{0}")]
    Retriever(#[from] ethos_retriever::RetrieverError),

    /// Storage error
    #[error("{0}")]
    Store(#[from] ethos_store::StoreError),

    /// Generation backend error
    #[error("{0}")]
    Generator(#[from] ethos_llm::GeneratorError),

    /// Embedding error
    #[error("{0}")]
    Embedding(#[from] ethos_embedding::EmbeddingError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
