//! Ethos Structural Parser (FIRAC detector)
//!
//! Segments a professional-ethics case narrative into its
//! Facts/Issues/Rules/Analysis/Conclusion components with a per-component
//! confidence derived from lexical cue density.
//!
//! The parser is deterministic (no randomness, no external calls) and never
//! fails: a narrative with no recognizable structure yields a single
//! Analysis-typed section spanning the whole text with confidence 0.
//!
//! # Examples
//!
//! ```
//! use ethos_parser::{FiracParser, ParserConfig};
//!
//! let parser = FiracParser::new(ParserConfig::default());
//! let sections = parser.parse(
//!     "Engineer X approved a design despite knowing of a structural flaw. \
//!      The Code requires disclosure of known safety risks.",
//! );
//! assert_eq!(sections.len(), 2);
//! ```

#![warn(missing_docs)]

mod config;
mod cues;
mod error;
mod parser;
mod segment;

pub use config::ParserConfig;
pub use error::ParserError;
pub use parser::FiracParser;
