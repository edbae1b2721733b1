//! Graph accessor error types

use thiserror::Error;

/// Errors that can occur while loading or querying the concept graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Knowledge base query failed during load
    #[error("Knowledge base unavailable: {0}")]
    Unavailable(String),
}
