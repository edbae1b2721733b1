//! Ethos Relevance Scorer and Precedent Retriever
//!
//! Ranks candidate ontology concepts and precedent cases against a target
//! case section by combining four sub-scores:
//!
//! - **vector**: sigmoid-normalized embedding similarity (weight 0.40)
//! - **term_overlap**: shared salient terms, stopword-filtered (weight 0.25)
//! - **structural**: section-type boost table / section-matched similarity (weight 0.20)
//! - **external**: caller-supplied semantic-judgment score (weight 0.15)
//!
//! Weights are configuration, not constants, and must sum to 1.0 - scorer
//! construction fails otherwise. Retrieval runs in two phases: a coarse
//! vector-only pass bounds the working set, then the full scorer ranks it.
//! Ties break by graph path distance, then term overlap, then candidate id,
//! so identical inputs always produce byte-identical rankings.

#![warn(missing_docs)]

mod candidate;
mod config;
mod error;
mod retriever;
mod scorer;
mod terms;

pub use candidate::Candidate;
pub use config::{BoostTable, RetrieverConfig, ScoringWeights};
pub use error::RetrieverError;
pub use retriever::PrecedentRetriever;
pub use scorer::{RelevanceScorer, ScoringContext};
pub use terms::salient_terms;
