//! Ontology concepts - the nodes of the ethics knowledge graph

use std::collections::BTreeSet;
use std::fmt;

/// The kind of an ontology concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConceptKind {
    /// A professional role (engineer, employer, client, public)
    Role,
    /// A normative principle (honesty, public welfare)
    Principle,
    /// A duty attached to a role (disclose known risks)
    Obligation,
    /// A state of affairs (conflict of interest exists)
    State,
    /// A thing acted upon (design, report, structure)
    Resource,
    /// Something an actor can do (approve, disclose, refuse)
    Action,
    /// Something that happened (failure, complaint)
    Event,
    /// An ability or competence boundary
    Capability,
}

impl ConceptKind {
    /// All concept kinds in a fixed order
    pub const ALL: [ConceptKind; 8] = [
        ConceptKind::Role,
        ConceptKind::Principle,
        ConceptKind::Obligation,
        ConceptKind::State,
        ConceptKind::Resource,
        ConceptKind::Action,
        ConceptKind::Event,
        ConceptKind::Capability,
    ];

    /// Parse a kind from its lowercase name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "role" => Some(ConceptKind::Role),
            "principle" => Some(ConceptKind::Principle),
            "obligation" => Some(ConceptKind::Obligation),
            "state" => Some(ConceptKind::State),
            "resource" => Some(ConceptKind::Resource),
            "action" => Some(ConceptKind::Action),
            "event" => Some(ConceptKind::Event),
            "capability" => Some(ConceptKind::Capability),
            _ => None,
        }
    }

    /// Lowercase name, stable across releases (used as a storage key)
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptKind::Role => "role",
            ConceptKind::Principle => "principle",
            ConceptKind::Obligation => "obligation",
            ConceptKind::State => "state",
            ConceptKind::Resource => "resource",
            ConceptKind::Action => "action",
            ConceptKind::Event => "event",
            ConceptKind::Capability => "capability",
        }
    }
}

impl fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the ethics ontology.
///
/// Concepts form a directed acyclic graph via `parent_uris`; multiple parents
/// are permitted, so this is explicitly not a tree. Nodes are loaded once from
/// the knowledge base at session start and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptNode {
    /// Globally unique concept URI (e.g. "ethos:obligation/disclose-known-risks")
    pub uri: String,

    /// Human-readable label
    pub label: String,

    /// Concept kind
    pub kind: ConceptKind,

    /// Embedding vector for the concept label/description
    pub embedding: Vec<f32>,

    /// Parent concept URIs; empty for root concepts
    pub parent_uris: BTreeSet<String>,
}

impl ConceptNode {
    /// Create a concept with no parents
    pub fn new(
        uri: impl Into<String>,
        label: impl Into<String>,
        kind: ConceptKind,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
            kind,
            embedding,
            parent_uris: BTreeSet::new(),
        }
    }

    /// Add a parent URI (builder style)
    pub fn with_parent(mut self, parent_uri: impl Into<String>) -> Self {
        self.parent_uris.insert(parent_uri.into());
        self
    }
}
