//! Precedent cases - previously resolved cases used as analogy sources

use crate::section::SectionType;
use std::collections::{BTreeMap, BTreeSet};

/// A previously resolved case, loaded from the knowledge base at session
/// start and queried by similarity afterwards.
///
/// Section embeddings are keyed by FIRAC type so a target section can be
/// compared against the corresponding section of the precedent rather than
/// against the whole case text.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecedentCase {
    /// Stable case identifier (e.g. "bER-92-6")
    pub id: String,

    /// Per-section embedding vectors; absent types were not present in the case
    pub section_embeddings: BTreeMap<SectionType, Vec<f32>>,

    /// URIs of ontology concepts this case was tagged with
    pub concept_refs: BTreeSet<String>,
}

impl PrecedentCase {
    /// Create a precedent with no embeddings or concept references
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_embeddings: BTreeMap::new(),
            concept_refs: BTreeSet::new(),
        }
    }

    /// Attach a section embedding (builder style)
    pub fn with_section_embedding(mut self, section_type: SectionType, embedding: Vec<f32>) -> Self {
        self.section_embeddings.insert(section_type, embedding);
        self
    }

    /// Attach a concept reference (builder style)
    pub fn with_concept_ref(mut self, uri: impl Into<String>) -> Self {
        self.concept_refs.insert(uri.into());
        self
    }

    /// The embedding most representative of the whole case: the Facts section
    /// if present, otherwise the first section in FIRAC order.
    pub fn primary_embedding(&self) -> Option<&Vec<f32>> {
        self.section_embeddings
            .get(&SectionType::Facts)
            .or_else(|| self.section_embeddings.values().next())
    }
}
