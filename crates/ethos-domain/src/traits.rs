//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the reasoning engine and its
//! infrastructure. Implementations live in other crates (`ethos-store`,
//! `ethos-llm`); the engine never constructs a generation client itself.

use crate::{ArtifactClaim, ConceptKind, ConceptNode, PrecedentCase};

/// A parent/child edge between two ontology concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptRelationship {
    /// URI of the child concept
    pub child_uri: String,

    /// URI of the parent concept
    pub parent_uri: String,
}

/// Read-only query interface to the knowledge base.
///
/// The engine reads concepts and precedent cases once at session start and
/// never writes back. If the underlying store changes, the graph must be
/// reloaded explicitly.
pub trait KnowledgeBase {
    /// Error type for knowledge base operations
    type Error;

    /// All concepts of the given kind
    fn get_concepts_by_kind(&self, kind: ConceptKind) -> Result<Vec<ConceptNode>, Self::Error>;

    /// All parent/child relationships between concepts
    fn get_relationships(&self) -> Result<Vec<ConceptRelationship>, Self::Error>;

    /// All precedent cases
    fn get_precedent_cases(&self) -> Result<Vec<PrecedentCase>, Self::Error>;
}

/// What a generation call returns: the reasoning text, the structured claims
/// it asserts, and optionally a semantic-judgment score the scorer can use as
/// its external metric.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    /// The generated reasoning text
    pub text: String,

    /// Structured claims asserted by the text
    pub claims: Vec<ArtifactClaim>,

    /// Optional semantic-judgment score in [0.0, 1.0]
    pub semantic_score: Option<f64>,
}

/// Trait for the external generation step.
///
/// The engine supplies an assembled prompt and receives a single output; how
/// the call is made (model choice, rate limiting, retries at the transport
/// level) is the implementation's concern.
pub trait Generator {
    /// Error type for generation operations
    type Error;

    /// Generate a reasoning artifact for the given prompt
    fn generate(&self, prompt: &str) -> Result<GenerationOutput, Self::Error>;
}
