//! Ethos CLI library.
//!
//! Argument parsing, output formatting, and command execution for the
//! `ethos` binary.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
mod error;
mod output;

pub use cli::{AdviseArgs, Cli, CliFormat, Command, ParseArgs, RetrieveArgs};
pub use error::{CliError, Result};
pub use output::Formatter;

/// Embedding dimension for the CLI's deterministic hash embedder
pub const EMBED_DIM: usize = 256;
