//! End-to-end case advisory pipeline.
//!
//! Wires the structural parser, precedent retriever, generation backend, and
//! constraint validator into a single `CaseAdvisor`: narrative in, validated
//! reasoning advice out. Generation runs behind a timeout; critical findings
//! drive a bounded regeneration loop.

#![warn(missing_docs)]

mod advisor;
mod config;
mod context;
mod error;

pub use advisor::{CaseAdvice, CaseAdvisor, SectionRetrieval};
pub use config::PipelineConfig;
pub use context::GenerationContext;
pub use error::PipelineError;
