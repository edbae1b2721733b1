//! Ethos Domain Layer
//!
//! This crate contains the core domain model for the Ethos case-reasoning
//! engine. It has no infrastructure dependencies and defines the fundamental
//! value objects and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **CaseSection**: one FIRAC component of a case narrative, with confidence
//! - **ConceptNode**: a node in the ethics ontology (role, principle, obligation, ...)
//! - **PrecedentCase**: a previously resolved case, queryable by similarity
//! - **RelevanceScore**: a weighted multi-metric relevance judgment
//! - **ValidationFinding**: one constraint violation with severity and remediation
//! - **ReasoningArtifact**: a generated reasoning text plus its structured claims
//!
//! ## Architecture
//!
//! Infrastructure implementations (SQLite knowledge base, HTTP generation
//! clients) live in other crates and plug in through the traits in
//! [`traits`]. The engine itself never constructs a generation client.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod concept;
pub mod finding;
pub mod precedent;
pub mod score;
pub mod section;
pub mod traits;

// Re-exports for convenience
pub use artifact::{ArtifactClaim, ArtifactId, ArtifactStatus, ReasoningArtifact};
pub use concept::{ConceptKind, ConceptNode};
pub use finding::{Remediation, Severity, ValidationFinding};
pub use precedent::PrecedentCase;
pub use score::{MetricBreakdown, RelevanceScore};
pub use section::{CaseSection, SectionType};
