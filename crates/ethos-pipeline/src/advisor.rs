//! The case advisor: parse, retrieve, generate, validate

use crate::context::GenerationContext;
use crate::{PipelineConfig, PipelineError};
use ethos_domain::traits::{GenerationOutput, Generator, KnowledgeBase};
use ethos_domain::{
    ArtifactStatus, CaseSection, PrecedentCase, ReasoningArtifact, RelevanceScore, SectionType,
    Severity, ValidationFinding,
};
use ethos_embedding::{CachingEmbedder, EmbeddingCache, EmbeddingModel};
use ethos_graph::ConceptGraph;
use ethos_parser::FiracParser;
use ethos_retriever::{Candidate, PrecedentRetriever, RelevanceScorer, ScoringContext};
use ethos_validator::ConstraintValidator;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Ranked retrieval results for one parsed section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRetrieval {
    /// The section these candidates were ranked against
    pub section_type: SectionType,

    /// Top-k scores, rank ascending
    pub scores: Vec<RelevanceScore>,
}

/// The pipeline's final answer for one case narrative
#[derive(Debug, Clone, PartialEq)]
pub struct CaseAdvice {
    /// Parsed case sections
    pub sections: Vec<CaseSection>,

    /// Per-section retrieval results
    pub retrievals: Vec<SectionRetrieval>,

    /// The final reasoning artifact (corrected or regenerated where needed)
    pub artifact: ReasoningArtifact,

    /// Terminal status of the artifact
    pub status: ArtifactStatus,

    /// All findings accumulated across validation attempts
    pub findings: Vec<ValidationFinding>,
}

/// Drives a case narrative through the full advisory pipeline.
///
/// The knowledge base is read once at construction; a failed load degrades
/// the advisor (no structural scoring, no constraint checking) rather than
/// failing it. Configuration problems are fatal at construction.
pub struct CaseAdvisor<M: EmbeddingModel, G> {
    parser: FiracParser,
    retriever: PrecedentRetriever<M>,
    validator: ConstraintValidator,
    generator: Arc<G>,
    graph: Option<ConceptGraph>,
    precedents: Vec<PrecedentCase>,
    timeout: Duration,
    top_k: usize,
}

impl<M, G> CaseAdvisor<M, G>
where
    M: EmbeddingModel,
    G: Generator + Send + Sync + 'static,
    G::Error: std::fmt::Display + Send,
{
    /// Build an advisor from a validated configuration, loading the ontology
    /// and precedent library from the knowledge base
    pub fn new<K>(
        config: PipelineConfig,
        kb: &K,
        model: M,
        generator: G,
    ) -> Result<Self, PipelineError>
    where
        K: KnowledgeBase,
        K::Error: std::fmt::Display,
    {
        config.validate()?;

        let graph = match ConceptGraph::load(kb) {
            Ok(graph) => Some(graph),
            Err(e) => {
                warn!(error = %e, "concept graph unavailable; scoring and validation degraded");
                None
            }
        };
        let precedents = match kb.get_precedent_cases() {
            Ok(precedents) => precedents,
            Err(e) => {
                warn!(error = %e, "precedent library unavailable");
                Vec::new()
            }
        };

        let scorer = RelevanceScorer::new(config.retriever)?;
        let embedder = CachingEmbedder::new(model, EmbeddingCache::new());

        Ok(Self {
            parser: FiracParser::new(config.parser),
            retriever: PrecedentRetriever::new(scorer, embedder),
            validator: ConstraintValidator::new(config.validator),
            generator: Arc::new(generator),
            graph,
            precedents,
            timeout: Duration::from_millis(config.generation_timeout_ms),
            top_k: config.top_k,
        })
    }

    /// Advise on a case narrative
    pub async fn advise(&self, narrative: &str) -> Result<CaseAdvice, PipelineError> {
        self.advise_with_anchors(narrative, &[]).await
    }

    /// Advise on a case narrative, measuring graph distances to the given
    /// anchor concept URIs
    pub async fn advise_with_anchors(
        &self,
        narrative: &str,
        anchors: &[String],
    ) -> Result<CaseAdvice, PipelineError> {
        let sections = self.parser.parse(narrative);

        let pool = self.candidate_pool();
        let ctx = match &self.graph {
            Some(graph) => ScoringContext {
                graph: Some(graph),
                anchors,
                external_score: None,
            },
            None => ScoringContext::degraded(),
        };

        let mut retrievals = Vec::with_capacity(sections.len());
        for section in &sections {
            let scores = self.retriever.retrieve(section, &pool, self.top_k, &ctx)?;
            retrievals.push(SectionRetrieval {
                section_type: section.section_type,
                scores,
            });
        }

        let prompt = GenerationContext::new(&sections, &retrievals, self.graph.as_ref()).prompt();

        let output = match self.generate_bounded(prompt.clone()).await? {
            Some(output) => output,
            None => {
                return Ok(CaseAdvice {
                    sections,
                    retrievals,
                    artifact: ReasoningArtifact::new("", vec![]),
                    status: ArtifactStatus::Flagged,
                    findings: vec![timeout_finding()],
                });
            }
        };
        let mut artifact = ReasoningArtifact::new(output.text, output.claims);

        let Some(graph) = &self.graph else {
            return Ok(CaseAdvice {
                sections,
                retrievals,
                artifact,
                status: ArtifactStatus::Flagged,
                findings: vec![ValidationFinding::new(
                    Severity::Minor,
                    "",
                    "concept graph unavailable; constraints not checked",
                )],
            });
        };

        // Validation loop with sequential, bounded regeneration
        let max_retries = self.validator.config().max_regeneration_retries;
        let mut accumulated: Vec<ValidationFinding> = Vec::new();
        let mut retries = 0;

        loop {
            let report = self.validator.validate(&artifact, graph);

            match report.status {
                ArtifactStatus::Accepted => {
                    let status = if retries > 0 {
                        ArtifactStatus::Regenerated
                    } else {
                        ArtifactStatus::Accepted
                    };
                    info!(status = %status, retries, "artifact validated");
                    return Ok(CaseAdvice {
                        sections,
                        retrievals,
                        artifact,
                        status,
                        findings: accumulated,
                    });
                }
                ArtifactStatus::Corrected => {
                    accumulated.extend(report.findings);
                    // validate() only reports Corrected with a replacement
                    let corrected = report.corrected.ok_or_else(|| {
                        PipelineError::Task("corrected report without artifact".to_string())
                    })?;
                    return Ok(CaseAdvice {
                        sections,
                        retrievals,
                        artifact: corrected,
                        status: ArtifactStatus::Corrected,
                        findings: accumulated,
                    });
                }
                ArtifactStatus::Flagged => {
                    accumulated.extend(report.findings);
                    return Ok(CaseAdvice {
                        sections,
                        retrievals,
                        artifact,
                        status: ArtifactStatus::Flagged,
                        findings: accumulated,
                    });
                }
                ArtifactStatus::Regenerated => {
                    let regen_prompt = regeneration_prompt(&prompt, &report.critical_rule_uris());
                    accumulated.extend(report.findings);

                    if retries >= max_retries {
                        warn!(retries, "regeneration limit exceeded; flagging artifact");
                        return Ok(CaseAdvice {
                            sections,
                            retrievals,
                            artifact,
                            status: ArtifactStatus::Flagged,
                            findings: accumulated,
                        });
                    }
                    retries += 1;

                    match self.generate_bounded(regen_prompt).await? {
                        Some(output) => {
                            artifact = ReasoningArtifact::new(output.text, output.claims);
                        }
                        None => {
                            accumulated.push(timeout_finding());
                            return Ok(CaseAdvice {
                                sections,
                                retrievals,
                                artifact,
                                status: ArtifactStatus::Flagged,
                                findings: accumulated,
                            });
                        }
                    }
                }
                ArtifactStatus::Pending => {
                    return Err(PipelineError::Task(
                        "validator returned a non-terminal status".to_string(),
                    ));
                }
            }
        }
    }

    fn candidate_pool(&self) -> Vec<Candidate<'_>> {
        let mut pool: Vec<Candidate<'_>> = match &self.graph {
            Some(graph) => graph.concepts().map(Candidate::Concept).collect(),
            None => Vec::new(),
        };
        pool.extend(self.precedents.iter().map(Candidate::Precedent));
        pool
    }

    /// Run the sync generator on the blocking pool under the configured
    /// timeout. `Ok(None)` means the timeout expired; the abandoned blocking
    /// task is left to finish on its own.
    async fn generate_bounded(
        &self,
        prompt: String,
    ) -> Result<Option<GenerationOutput>, PipelineError> {
        let generator = Arc::clone(&self.generator);
        let task = tokio::task::spawn_blocking(move || generator.generate(&prompt));

        match tokio::time::timeout(self.timeout, task).await {
            Err(_) => {
                warn!("generation timed out");
                Ok(None)
            }
            Ok(Err(e)) => Err(PipelineError::Task(e.to_string())),
            Ok(Ok(Err(e))) => Err(PipelineError::Generation(e.to_string())),
            Ok(Ok(Ok(output))) => Ok(Some(output)),
        }
    }
}

fn timeout_finding() -> ValidationFinding {
    ValidationFinding::new(Severity::Minor, "", "generation timed out")
}

/// Append the violated constraints to the prompt as negative instructions
fn regeneration_prompt(base: &str, violated_uris: &[&str]) -> String {
    let mut prompt = base.to_string();
    prompt.push_str("\n## Your previous answer violated these constraints\n");
    for uri in violated_uris {
        let _ = writeln!(
            prompt,
            "- Do not attribute obligation '{}' to a role it is not linked to.",
            uri
        );
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethos_domain::{ArtifactClaim, ConceptKind, ConceptNode};
    use ethos_embedding::HashEmbedder;
    use ethos_llm::MockGenerator;
    use ethos_store::MemoryKnowledgeBase;

    const NARRATIVE: &str = "Engineer X approved a design despite knowing of a structural flaw. \
                             The Code requires disclosure of known safety risks.";

    fn embed(text: &str) -> Vec<f32> {
        HashEmbedder::new(64).embed(text).unwrap()
    }

    fn fixture_kb() -> MemoryKnowledgeBase {
        MemoryKnowledgeBase::new()
            .with_concept(ConceptNode::new(
                "ethos:role/engineer",
                "Engineer",
                ConceptKind::Role,
                embed("Engineer"),
            ))
            .with_concept(
                ConceptNode::new(
                    "ethos:obligation/disclose-known-risks",
                    "Disclose Known Risks",
                    ConceptKind::Obligation,
                    embed("Disclose Known Risks"),
                )
                .with_parent("ethos:role/engineer"),
            )
            .with_concept(ConceptNode::new(
                "ethos:principle/public-welfare",
                "Public Welfare",
                ConceptKind::Principle,
                embed("Public Welfare"),
            ))
            .with_precedent(
                PrecedentCase::new("ber-92-6")
                    .with_section_embedding(
                        SectionType::Facts,
                        embed("engineer approved flawed design"),
                    )
                    .with_concept_ref("ethos:obligation/disclose-known-risks"),
            )
    }

    fn valid_output() -> GenerationOutput {
        GenerationOutput {
            text: "The engineer must Disclose Known Risks to the client.".to_string(),
            claims: vec![ArtifactClaim {
                role_uri: "ethos:role/engineer".to_string(),
                obligation_uri: "ethos:obligation/disclose-known-risks".to_string(),
                obligation_label: "Disclose Known Risks".to_string(),
                citation: Some("Code II.1.a".to_string()),
            }],
            semantic_score: Some(0.9),
        }
    }

    fn critical_output() -> GenerationOutput {
        let mut output = valid_output();
        // Public welfare is a principle, not a role linked to the obligation
        output.claims[0].role_uri = "ethos:principle/public-welfare".to_string();
        output
    }

    fn advisor_with(generator: MockGenerator) -> CaseAdvisor<HashEmbedder, MockGenerator> {
        CaseAdvisor::new(
            PipelineConfig::default(),
            &fixture_kb(),
            HashEmbedder::new(64),
            generator,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_accepted_path() {
        let generator = MockGenerator::with_output(valid_output());
        let counter = generator.clone();
        let advisor = advisor_with(generator);

        let advice = advisor.advise(NARRATIVE).await.unwrap();

        assert_eq!(advice.status, ArtifactStatus::Accepted);
        assert!(advice.findings.is_empty());
        assert_eq!(advice.artifact.claims.len(), 1);
        assert_eq!(advice.sections.len(), advice.retrievals.len());
        assert!(advice.retrievals.iter().all(|r| !r.scores.is_empty()));
        assert_eq!(counter.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_narrative_yields_advice() {
        let generator = MockGenerator::with_output(valid_output());
        let advisor = advisor_with(generator);

        let advice = advisor.advise("").await.unwrap();

        // The degenerate parse still flows through the pipeline: one empty
        // Analysis section, no retrieval candidates, validated artifact
        assert_eq!(advice.sections.len(), 1);
        assert_eq!(advice.sections[0].section_type, SectionType::Analysis);
        assert_eq!(advice.retrievals.len(), 1);
        assert!(advice.retrievals[0].scores.is_empty());
        assert_eq!(advice.status, ArtifactStatus::Accepted);
    }

    #[tokio::test]
    async fn test_regeneration_recovers() {
        let generator = MockGenerator::with_output(valid_output());
        generator.push_output(critical_output());
        let counter = generator.clone();
        let advisor = advisor_with(generator);

        let advice = advisor.advise(NARRATIVE).await.unwrap();

        assert_eq!(advice.status, ArtifactStatus::Regenerated);
        assert_eq!(counter.call_count(), 2);
        // The critical finding from the first attempt is kept as provenance
        assert!(advice
            .findings
            .iter()
            .any(|f| f.severity == Severity::Critical));
        assert_eq!(
            advice.artifact.claims[0].role_uri,
            "ethos:role/engineer"
        );
    }

    #[tokio::test]
    async fn test_regeneration_bounded_then_flagged() {
        // Every attempt produces the same critical violation
        let generator = MockGenerator::with_output(critical_output());
        let counter = generator.clone();
        let advisor = advisor_with(generator);

        let advice = advisor.advise(NARRATIVE).await.unwrap();

        assert_eq!(advice.status, ArtifactStatus::Flagged);
        // Initial attempt plus two retries
        assert_eq!(counter.call_count(), 3);
        assert_eq!(
            advice
                .findings
                .iter()
                .filter(|f| f.severity == Severity::Critical)
                .count(),
            3
        );
    }

    #[tokio::test]
    async fn test_major_finding_corrected() {
        let mut output = valid_output();
        output.claims[0].obligation_label = "Reveal Hazards".to_string();
        let advisor = advisor_with(MockGenerator::with_output(output));

        let advice = advisor.advise(NARRATIVE).await.unwrap();

        assert_eq!(advice.status, ArtifactStatus::Corrected);
        assert_eq!(
            advice.artifact.claims[0].obligation_label,
            "Disclose Known Risks"
        );
    }

    #[tokio::test]
    async fn test_timeout_flags_artifact() {
        struct SlowGenerator;
        impl Generator for SlowGenerator {
            type Error = std::convert::Infallible;
            fn generate(&self, _prompt: &str) -> Result<GenerationOutput, Self::Error> {
                std::thread::sleep(Duration::from_millis(500));
                Ok(GenerationOutput {
                    text: "late".to_string(),
                    claims: vec![],
                    semantic_score: None,
                })
            }
        }

        let config = PipelineConfig {
            generation_timeout_ms: 20,
            ..Default::default()
        };
        let advisor =
            CaseAdvisor::new(config, &fixture_kb(), HashEmbedder::new(64), SlowGenerator).unwrap();

        let advice = advisor.advise(NARRATIVE).await.unwrap();

        assert_eq!(advice.status, ArtifactStatus::Flagged);
        assert!(advice.findings.iter().any(|f| f.description.contains("timed out")));
    }

    #[tokio::test]
    async fn test_graph_unavailable_degrades() {
        struct FailingKb;
        impl KnowledgeBase for FailingKb {
            type Error = String;
            fn get_concepts_by_kind(
                &self,
                _: ConceptKind,
            ) -> Result<Vec<ConceptNode>, String> {
                Err("database is down".to_string())
            }
            fn get_relationships(
                &self,
            ) -> Result<Vec<ethos_domain::traits::ConceptRelationship>, String> {
                Err("database is down".to_string())
            }
            fn get_precedent_cases(&self) -> Result<Vec<PrecedentCase>, String> {
                Err("database is down".to_string())
            }
        }

        let advisor = CaseAdvisor::new(
            PipelineConfig::default(),
            &FailingKb,
            HashEmbedder::new(64),
            MockGenerator::with_output(valid_output()),
        )
        .unwrap();

        let advice = advisor.advise(NARRATIVE).await.unwrap();

        // No graph: generation still happens, but constraints go unchecked
        assert_eq!(advice.status, ArtifactStatus::Flagged);
        assert!(advice
            .findings
            .iter()
            .any(|f| f.description.contains("graph unavailable")));
    }

    #[tokio::test]
    async fn test_invalid_config_fatal_at_construction() {
        let mut config = PipelineConfig::default();
        config.retriever.weights.vector = 0.9;

        let result = CaseAdvisor::new(
            config,
            &fixture_kb(),
            HashEmbedder::new(64),
            MockGenerator::default(),
        );
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        struct FailingGenerator;
        impl Generator for FailingGenerator {
            type Error = String;
            fn generate(&self, _prompt: &str) -> Result<GenerationOutput, Self::Error> {
                Err("backend exploded".to_string())
            }
        }

        let advisor = CaseAdvisor::new(
            PipelineConfig::default(),
            &fixture_kb(),
            HashEmbedder::new(64),
            FailingGenerator,
        )
        .unwrap();

        let result = advisor.advise(NARRATIVE).await;
        assert!(matches!(result, Err(PipelineError::Generation(_))));
    }
}
