//! Prompt assembly for the generation step

use crate::advisor::SectionRetrieval;
use ethos_domain::{CaseSection, ConceptKind};
use ethos_graph::ConceptGraph;
use std::fmt::Write;

/// Everything the generation step is shown: the parsed sections, the ranked
/// candidates per section, and the graph-derived constraints that apply to
/// the obligations among them.
pub struct GenerationContext<'a> {
    sections: &'a [CaseSection],
    retrievals: &'a [SectionRetrieval],
    graph: Option<&'a ConceptGraph>,
}

impl<'a> GenerationContext<'a> {
    /// Assemble a context from the pipeline's intermediate results
    pub fn new(
        sections: &'a [CaseSection],
        retrievals: &'a [SectionRetrieval],
        graph: Option<&'a ConceptGraph>,
    ) -> Self {
        Self {
            sections,
            retrievals,
            graph,
        }
    }

    /// Render the generation prompt.
    ///
    /// The answer format instruction matches what the backends parse: a JSON
    /// document with the reasoning text and its structured claims.
    pub fn prompt(&self) -> String {
        let mut prompt = String::from(
            "You are advising on a professional ethics case. \
             Reason from the case sections, the relevant concepts and precedents, \
             and the constraints below.\n\n## Case sections\n",
        );

        for section in self.sections {
            let _ = writeln!(
                prompt,
                "[{}] (confidence {:.2}) {}",
                section.section_type, section.confidence, section.text
            );
        }

        prompt.push_str("\n## Relevant concepts and precedents\n");
        for retrieval in self.retrievals {
            let _ = writeln!(prompt, "For the {} section:", retrieval.section_type);
            for score in &retrieval.scores {
                let _ = writeln!(
                    prompt,
                    "  {}. {} (relevance {:.2})",
                    score.rank, score.target_id, score.combined
                );
            }
        }

        let constraints = self.constraint_lines();
        if !constraints.is_empty() {
            prompt.push_str("\n## Constraints\n");
            for line in constraints {
                let _ = writeln!(prompt, "- {}", line);
            }
        }

        prompt.push_str(
            "\nAnswer with a JSON document: {\"text\": \"...\", \"claims\": \
             [{\"role_uri\": \"...\", \"obligation_uri\": \"...\", \
             \"obligation_label\": \"...\", \"citation\": \"...\"}]}. \
             Only attribute obligations permitted by the constraints, \
             use the exact labels given, and cite a rule for every claim.\n",
        );

        prompt
    }

    /// One line per retrieved obligation naming the roles it may be
    /// attributed to, taken from the obligation's parent edges.
    fn constraint_lines(&self) -> Vec<String> {
        let Some(graph) = self.graph else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        let mut seen = std::collections::BTreeSet::new();
        for retrieval in self.retrievals {
            for score in &retrieval.scores {
                let Some(node) = graph.node(&score.target_id) else {
                    continue;
                };
                if node.kind != ConceptKind::Obligation || !seen.insert(node.uri.clone()) {
                    continue;
                }
                let parents: Vec<&str> = node.parent_uris.iter().map(|s| s.as_str()).collect();
                if parents.is_empty() {
                    continue;
                }
                lines.push(format!(
                    "obligation '{}' ({}) may only be attributed to: {}",
                    node.uri,
                    node.label,
                    parents.join(", ")
                ));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethos_domain::traits::{ConceptRelationship, KnowledgeBase};
    use ethos_domain::{
        ConceptNode, MetricBreakdown, PrecedentCase, RelevanceScore, SectionType,
    };

    struct FixtureKb;

    impl KnowledgeBase for FixtureKb {
        type Error = String;

        fn get_concepts_by_kind(&self, kind: ConceptKind) -> Result<Vec<ConceptNode>, String> {
            let all = vec![
                ConceptNode::new("ethos:role/engineer", "Engineer", ConceptKind::Role, vec![]),
                ConceptNode::new(
                    "ethos:obligation/disclose-known-risks",
                    "Disclose Known Risks",
                    ConceptKind::Obligation,
                    vec![],
                )
                .with_parent("ethos:role/engineer"),
            ];
            Ok(all.into_iter().filter(|c| c.kind == kind).collect())
        }

        fn get_relationships(&self) -> Result<Vec<ConceptRelationship>, String> {
            Ok(vec![])
        }

        fn get_precedent_cases(&self) -> Result<Vec<PrecedentCase>, String> {
            Ok(vec![])
        }
    }

    fn score(target_id: &str, rank: usize) -> RelevanceScore {
        RelevanceScore {
            target_id: target_id.to_string(),
            breakdown: MetricBreakdown::default(),
            combined: 0.8,
            rank,
            graph_distance: None,
        }
    }

    #[test]
    fn test_prompt_carries_sections_and_candidates() {
        let sections = vec![CaseSection::new(
            SectionType::Rules,
            "The Code requires disclosure.",
            0.5,
            (0, 29),
        )];
        let retrievals = vec![SectionRetrieval {
            section_type: SectionType::Rules,
            scores: vec![score("ethos:obligation/disclose-known-risks", 1)],
        }];
        let graph = ConceptGraph::load(&FixtureKb).unwrap();

        let prompt = GenerationContext::new(&sections, &retrievals, Some(&graph)).prompt();

        assert!(prompt.contains("The Code requires disclosure."));
        assert!(prompt.contains("ethos:obligation/disclose-known-risks"));
        assert!(prompt.contains("may only be attributed to: ethos:role/engineer"));
        assert!(prompt.contains("\"claims\""));
    }

    #[test]
    fn test_prompt_without_graph_has_no_constraints() {
        let sections = vec![CaseSection::new(SectionType::Facts, "Facts.", 0.5, (0, 6))];
        let retrievals = vec![SectionRetrieval {
            section_type: SectionType::Facts,
            scores: vec![score("ber-92-6", 1)],
        }];

        let prompt = GenerationContext::new(&sections, &retrievals, None).prompt();
        assert!(!prompt.contains("## Constraints"));
    }
}
