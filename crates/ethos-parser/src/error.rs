//! Parser error types

use thiserror::Error;

/// Errors that can occur around parsing.
///
/// Parsing itself never fails; only configuration handling does.
#[derive(Error, Debug)]
pub enum ParserError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
