//! Candidate pool entries: concepts and precedent cases

use ethos_domain::{ConceptKind, ConceptNode, PrecedentCase, SectionType};

/// One entry in a retrieval candidate pool.
///
/// Borrows from the loaded graph/knowledge-base snapshot; pools are cheap to
/// build per retrieval call.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// An ontology concept
    Concept(&'a ConceptNode),
    /// A precedent case
    Precedent(&'a PrecedentCase),
}

impl<'a> Candidate<'a> {
    /// Concept URI or precedent case id
    pub fn id(&self) -> &'a str {
        match self {
            Candidate::Concept(node) => &node.uri,
            Candidate::Precedent(case) => &case.id,
        }
    }

    /// Concept kind; None for precedents
    pub fn kind(&self) -> Option<ConceptKind> {
        match self {
            Candidate::Concept(node) => Some(node.kind),
            Candidate::Precedent(_) => None,
        }
    }

    /// The embedding compared by the vector metric: the concept embedding,
    /// or the precedent's whole-case representative embedding.
    pub fn primary_embedding(&self) -> Option<&'a [f32]> {
        match self {
            Candidate::Concept(node) => {
                if node.embedding.is_empty() {
                    None
                } else {
                    Some(node.embedding.as_slice())
                }
            }
            Candidate::Precedent(case) => case.primary_embedding().map(|v| v.as_slice()),
        }
    }

    /// The precedent embedding for a specific section type, if any.
    /// Concepts have no per-section embeddings.
    pub fn section_embedding(&self, section_type: SectionType) -> Option<&'a [f32]> {
        match self {
            Candidate::Concept(_) => None,
            Candidate::Precedent(case) => case
                .section_embeddings
                .get(&section_type)
                .map(|v| v.as_slice()),
        }
    }

    /// Text used for lexical overlap: the concept label, or the precedent id
    /// with separators spaced out.
    pub fn overlap_text(&self) -> String {
        match self {
            Candidate::Concept(node) => node.label.clone(),
            Candidate::Precedent(case) => case.id.replace(['-', '_', ':'], " "),
        }
    }

    /// Concept URIs this candidate is tied to in the graph, for distance
    /// computation: the concept itself, or the precedent's concept refs.
    pub fn graph_uris(&self) -> Vec<&'a str> {
        match self {
            Candidate::Concept(node) => vec![node.uri.as_str()],
            Candidate::Precedent(case) => case.concept_refs.iter().map(|s| s.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_candidate_accessors() {
        let node = ConceptNode::new("uri/x", "Label X", ConceptKind::Role, vec![1.0, 0.0]);
        let candidate = Candidate::Concept(&node);

        assert_eq!(candidate.id(), "uri/x");
        assert_eq!(candidate.kind(), Some(ConceptKind::Role));
        assert_eq!(candidate.primary_embedding(), Some([1.0, 0.0].as_slice()));
        assert_eq!(candidate.section_embedding(SectionType::Facts), None);
        assert_eq!(candidate.graph_uris(), vec!["uri/x"]);
    }

    #[test]
    fn test_precedent_candidate_accessors() {
        let case = PrecedentCase::new("ber-92-6")
            .with_section_embedding(SectionType::Facts, vec![0.5, 0.5])
            .with_concept_ref("uri/a")
            .with_concept_ref("uri/b");
        let candidate = Candidate::Precedent(&case);

        assert_eq!(candidate.id(), "ber-92-6");
        assert_eq!(candidate.kind(), None);
        assert!(candidate.primary_embedding().is_some());
        assert!(candidate.section_embedding(SectionType::Facts).is_some());
        assert!(candidate.section_embedding(SectionType::Rules).is_none());
        assert_eq!(candidate.graph_uris().len(), 2);
        assert_eq!(candidate.overlap_text(), "ber 92 6");
    }

    #[test]
    fn test_empty_concept_embedding_is_none() {
        let node = ConceptNode::new("uri/y", "Y", ConceptKind::State, vec![]);
        assert_eq!(Candidate::Concept(&node).primary_embedding(), None);
    }
}
