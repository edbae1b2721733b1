//! In-memory knowledge base, for tests and small fixtures

use ethos_domain::traits::{ConceptRelationship, KnowledgeBase};
use ethos_domain::{ConceptKind, ConceptNode, PrecedentCase};

/// A [`KnowledgeBase`] held entirely in memory.
///
/// Used as a test double and for seeding demos without a database file.
#[derive(Debug, Clone, Default)]
pub struct MemoryKnowledgeBase {
    concepts: Vec<ConceptNode>,
    relationships: Vec<ConceptRelationship>,
    precedents: Vec<PrecedentCase>,
}

impl MemoryKnowledgeBase {
    /// Create an empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a concept (builder style)
    pub fn with_concept(mut self, node: ConceptNode) -> Self {
        self.concepts.push(node);
        self
    }

    /// Add a parent/child edge (builder style)
    pub fn with_relationship(
        mut self,
        child_uri: impl Into<String>,
        parent_uri: impl Into<String>,
    ) -> Self {
        self.relationships.push(ConceptRelationship {
            child_uri: child_uri.into(),
            parent_uri: parent_uri.into(),
        });
        self
    }

    /// Add a precedent case (builder style)
    pub fn with_precedent(mut self, case: PrecedentCase) -> Self {
        self.precedents.push(case);
        self
    }
}

impl KnowledgeBase for MemoryKnowledgeBase {
    type Error = std::convert::Infallible;

    fn get_concepts_by_kind(&self, kind: ConceptKind) -> Result<Vec<ConceptNode>, Self::Error> {
        Ok(self
            .concepts
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }

    fn get_relationships(&self) -> Result<Vec<ConceptRelationship>, Self::Error> {
        Ok(self.relationships.clone())
    }

    fn get_precedent_cases(&self) -> Result<Vec<PrecedentCase>, Self::Error> {
        Ok(self.precedents.clone())
    }
}
