//! Multi-metric relevance scoring

use crate::candidate::Candidate;
use crate::config::RetrieverConfig;
use crate::terms::{salient_terms, term_overlap};
use crate::RetrieverError;
use ethos_domain::{CaseSection, MetricBreakdown, RelevanceScore};
use ethos_embedding::normalized_similarity;
use ethos_graph::ConceptGraph;

/// Per-call scoring inputs beyond the section itself.
///
/// `graph: None` is the degraded `GraphUnavailable` mode: structural and
/// graph-distance sub-scores are forced to 0 and retrieval continues on the
/// lexical and vector metrics alone.
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    /// The loaded concept graph, if available
    pub graph: Option<&'a ConceptGraph>,

    /// Concept URIs already associated with the target case; graph distance
    /// is measured to the nearest anchor
    pub anchors: &'a [String],

    /// External semantic-judgment score from the generation step, if any.
    /// Treated as 0 when absent - the weight is not renormalized.
    pub external_score: Option<f64>,
}

impl<'a> ScoringContext<'a> {
    /// Context with a graph and no anchors or external score
    pub fn with_graph(graph: &'a ConceptGraph) -> Self {
        Self {
            graph: Some(graph),
            anchors: &[],
            external_score: None,
        }
    }

    /// Degraded context: no graph, no anchors, no external score
    pub fn degraded() -> Self {
        Self {
            graph: None,
            anchors: &[],
            external_score: None,
        }
    }
}

/// Combines the four relevance metrics into one [`RelevanceScore`].
pub struct RelevanceScorer {
    config: RetrieverConfig,
}

impl RelevanceScorer {
    /// Create a scorer, validating the configuration.
    ///
    /// Weight sets that do not sum to 1.0 are rejected here, so every score
    /// this scorer produces is guaranteed to lie in [0, 1].
    pub fn new(config: RetrieverConfig) -> Result<Self, RetrieverError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Borrow the validated configuration
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Score one candidate against a section.
    ///
    /// `section_embedding` is the (cached) embedding of the section text;
    /// the caller computes it once per retrieval call. `rank` on the result
    /// is 0 until the retriever assigns positions.
    pub fn score(
        &self,
        section: &CaseSection,
        section_embedding: &[f32],
        candidate: &Candidate<'_>,
        ctx: &ScoringContext<'_>,
    ) -> RelevanceScore {
        let vector = candidate
            .primary_embedding()
            .map(|emb| normalized_similarity(section_embedding, emb))
            .unwrap_or(0.0);

        let section_terms = salient_terms(&section.text);
        let candidate_terms = salient_terms(&candidate.overlap_text());
        let overlap = term_overlap(&section_terms, &candidate_terms);

        let structural = match ctx.graph {
            // GraphUnavailable degrades the structural metric to 0
            None => 0.0,
            Some(_) => self.structural_score(section, section_embedding, candidate),
        };

        let external = ctx.external_score.unwrap_or(0.0).clamp(0.0, 1.0);

        let graph_distance = ctx.graph.and_then(|graph| {
            candidate
                .graph_uris()
                .iter()
                .filter_map(|uri| graph.min_distance_to_any(uri, ctx.anchors.iter().map(|a| a.as_str())))
                .min()
        });

        let breakdown = MetricBreakdown {
            vector,
            term_overlap: overlap,
            structural,
            external,
        };

        let weights = &self.config.weights;
        let combined = (weights.vector * vector
            + weights.term_overlap * overlap
            + weights.structural * structural
            + weights.external * external)
            .clamp(0.0, 1.0);

        RelevanceScore {
            target_id: candidate.id().to_string(),
            breakdown,
            combined,
            rank: 0,
            graph_distance,
        }
    }

    /// Structural sub-score: additive kind boost for concepts,
    /// section-matched embedding similarity for precedents.
    fn structural_score(
        &self,
        section: &CaseSection,
        section_embedding: &[f32],
        candidate: &Candidate<'_>,
    ) -> f64 {
        match candidate.kind() {
            Some(kind) => {
                let boost = self.config.boosts.boost(section.section_type, kind);
                (self.config.structural_base + boost).clamp(0.0, 1.0)
            }
            None => candidate
                .section_embedding(section.section_type)
                .map(|emb| normalized_similarity(section_embedding, emb))
                .unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethos_domain::traits::{ConceptRelationship, KnowledgeBase};
    use ethos_domain::{ConceptKind, ConceptNode, PrecedentCase, SectionType};
    use ethos_embedding::{EmbeddingModel, HashEmbedder};

    struct EmptyKb;

    impl KnowledgeBase for EmptyKb {
        type Error = String;
        fn get_concepts_by_kind(&self, _: ConceptKind) -> Result<Vec<ConceptNode>, String> {
            Ok(vec![])
        }
        fn get_relationships(&self) -> Result<Vec<ConceptRelationship>, String> {
            Ok(vec![])
        }
        fn get_precedent_cases(&self) -> Result<Vec<PrecedentCase>, String> {
            Ok(vec![])
        }
    }

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new(RetrieverConfig::default()).unwrap()
    }

    fn rules_section() -> CaseSection {
        CaseSection::new(
            SectionType::Rules,
            "The Code requires disclosure of known safety risks.",
            0.5,
            (0, 51),
        )
    }

    fn facts_section() -> CaseSection {
        CaseSection::new(
            SectionType::Facts,
            "Engineer X approved a design despite knowing of a structural flaw.",
            0.5,
            (0, 66),
        )
    }

    #[test]
    fn test_invalid_weights_rejected_at_construction() {
        let mut config = RetrieverConfig::default();
        config.weights.vector = 0.9;
        assert!(RelevanceScorer::new(config).is_err());
    }

    #[test]
    fn test_combined_in_unit_interval() {
        let model = HashEmbedder::new(64);
        let scorer = scorer();
        let graph = ConceptGraph::load(&EmptyKb).unwrap();

        let node = ConceptNode::new(
            "ethos:obligation/disclose-known-risks",
            "Disclose Known Risks",
            ConceptKind::Obligation,
            model.embed("Disclose Known Risks").unwrap(),
        );
        let section = rules_section();
        let section_emb = model.embed(&section.text).unwrap();

        let score = scorer.score(
            &section,
            &section_emb,
            &Candidate::Concept(&node),
            &ScoringContext::with_graph(&graph),
        );

        assert!((0.0..=1.0).contains(&score.combined));
        for v in [
            score.breakdown.vector,
            score.breakdown.term_overlap,
            score.breakdown.structural,
            score.breakdown.external,
        ] {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_obligation_structural_higher_for_rules_than_facts() {
        let model = HashEmbedder::new(64);
        let scorer = scorer();
        let graph = ConceptGraph::load(&EmptyKb).unwrap();

        let node = ConceptNode::new(
            "ethos:obligation/disclose-known-risks",
            "Disclose Known Risks",
            ConceptKind::Obligation,
            model.embed("Disclose Known Risks").unwrap(),
        );
        let ctx = ScoringContext::with_graph(&graph);

        let rules = rules_section();
        let facts = facts_section();
        let rules_emb = model.embed(&rules.text).unwrap();
        let facts_emb = model.embed(&facts.text).unwrap();

        let against_rules = scorer.score(&rules, &rules_emb, &Candidate::Concept(&node), &ctx);
        let against_facts = scorer.score(&facts, &facts_emb, &Candidate::Concept(&node), &ctx);

        assert!(
            against_rules.breakdown.structural > against_facts.breakdown.structural,
            "rules structural {} should exceed facts structural {}",
            against_rules.breakdown.structural,
            against_facts.breakdown.structural
        );
    }

    #[test]
    fn test_missing_external_score_is_zero_not_renormalized() {
        let model = HashEmbedder::new(64);
        let scorer = scorer();
        let graph = ConceptGraph::load(&EmptyKb).unwrap();

        let node = ConceptNode::new("uri/x", "Label", ConceptKind::Role, model.embed("Label").unwrap());
        let section = facts_section();
        let section_emb = model.embed(&section.text).unwrap();

        let without = scorer.score(
            &section,
            &section_emb,
            &Candidate::Concept(&node),
            &ScoringContext::with_graph(&graph),
        );
        let with = scorer.score(
            &section,
            &section_emb,
            &Candidate::Concept(&node),
            &ScoringContext {
                external_score: Some(1.0),
                ..ScoringContext::with_graph(&graph)
            },
        );

        assert_eq!(without.breakdown.external, 0.0);
        // The external weight's full 0.15 is the only difference
        assert!((with.combined - without.combined - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_degraded_context_zeroes_structural_and_distance() {
        let model = HashEmbedder::new(64);
        let scorer = scorer();

        let node = ConceptNode::new(
            "uri/x",
            "Disclose Known Risks",
            ConceptKind::Obligation,
            model.embed("Disclose Known Risks").unwrap(),
        );
        let section = rules_section();
        let section_emb = model.embed(&section.text).unwrap();

        let score = scorer.score(
            &section,
            &section_emb,
            &Candidate::Concept(&node),
            &ScoringContext::degraded(),
        );

        assert_eq!(score.breakdown.structural, 0.0);
        assert_eq!(score.graph_distance, None);
        // Lexical and vector metrics still contribute
        assert!(score.breakdown.term_overlap > 0.0);
    }

    #[test]
    fn test_precedent_structural_uses_matching_section() {
        let model = HashEmbedder::new(64);
        let scorer = scorer();
        let graph = ConceptGraph::load(&EmptyKb).unwrap();

        let section = rules_section();
        let section_emb = model.embed(&section.text).unwrap();

        // Precedent whose Rules section is the same text scores structural
        // near 1; one with only unrelated sections scores 0
        let matching = PrecedentCase::new("case-match")
            .with_section_embedding(SectionType::Rules, section_emb.clone());
        let unrelated = PrecedentCase::new("case-other")
            .with_section_embedding(SectionType::Facts, model.embed("unrelated facts").unwrap());

        let ctx = ScoringContext::with_graph(&graph);
        let matched = scorer.score(&section, &section_emb, &Candidate::Precedent(&matching), &ctx);
        let missed = scorer.score(&section, &section_emb, &Candidate::Precedent(&unrelated), &ctx);

        assert!(matched.breakdown.structural > 0.95);
        assert_eq!(missed.breakdown.structural, 0.0);
    }
}
