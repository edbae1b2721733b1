//! Validator error types

use thiserror::Error;

/// Errors from the constraint validator
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
