//! Constraint checking and targeted correction

use crate::ValidatorConfig;
use ethos_domain::{
    ArtifactStatus, ReasoningArtifact, Remediation, Severity, ValidationFinding,
};
use ethos_graph::ConceptGraph;
use tracing::debug;

/// Outcome of one validation attempt on one artifact.
///
/// `status` is the terminal state of the attempt: `Regenerated` means the
/// artifact was discarded and the caller should request a replacement (the
/// remediation loop in the pipeline is bounded by
/// [`ValidatorConfig::max_regeneration_retries`]); `Corrected` means
/// `corrected` holds a repaired replacement artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Terminal status of this validation attempt
    pub status: ArtifactStatus,

    /// Every violated constraint, in claim order
    pub findings: Vec<ValidationFinding>,

    /// The repaired artifact, present only when `status` is `Corrected`
    pub corrected: Option<ReasoningArtifact>,
}

impl ValidationReport {
    /// Rule URIs of critical findings, for use as negative instructions in a
    /// regeneration prompt
    pub fn critical_rule_uris(&self) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Critical)
            .map(|f| f.rule_uri.as_str())
            .collect()
    }
}

/// Validates reasoning artifacts against graph-derived constraints.
///
/// Validation is a pure function of (artifact, graph, config): the same
/// inputs always produce the same report.
pub struct ConstraintValidator {
    config: ValidatorConfig,
}

/// What targeted correction to apply for one major finding
enum Correction {
    RemoveClaim(usize),
    SubstituteLabel { claim: usize, graph_label: String },
}

impl ConstraintValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidatorConfig::default())
    }

    /// Borrow the configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate an artifact's claims against the concept graph.
    ///
    /// Checks, per claim:
    /// - obligation unreachable from its role (or either URI unknown to the
    ///   graph when reachability is required): Critical, regenerate;
    /// - obligation URI unknown, or claim label inconsistent with the graph
    ///   label: Major, targeted correction;
    /// - missing citation: Minor, flag.
    ///
    /// No findings yields `Accepted`. Otherwise the status follows the
    /// maximum-severity finding's remediation; major findings additionally
    /// produce a corrected replacement artifact unless a critical finding
    /// discards the artifact entirely.
    pub fn validate(&self, artifact: &ReasoningArtifact, graph: &ConceptGraph) -> ValidationReport {
        let mut findings = Vec::new();
        let mut corrections = Vec::new();

        if self.config.require_claims && artifact.claims.is_empty() {
            findings.push(ValidationFinding::new(
                Severity::Minor,
                "",
                "artifact asserts no structured claims",
            ));
        }

        for (idx, claim) in artifact.claims.iter().enumerate() {
            let obligation = graph.node(&claim.obligation_uri);

            match obligation {
                None => {
                    if self.config.check_known_obligations {
                        findings.push(ValidationFinding::new(
                            Severity::Major,
                            &claim.obligation_uri,
                            format!(
                                "obligation '{}' is not in the concept graph",
                                claim.obligation_uri
                            ),
                        ));
                        corrections.push(Correction::RemoveClaim(idx));
                    }
                }
                Some(node) => {
                    if self.config.check_labels
                        && !labels_match(&node.label, &claim.obligation_label)
                    {
                        findings.push(ValidationFinding::new(
                            Severity::Major,
                            &claim.obligation_uri,
                            format!(
                                "claim label '{}' does not match graph label '{}'",
                                claim.obligation_label, node.label
                            ),
                        ));
                        corrections.push(Correction::SubstituteLabel {
                            claim: idx,
                            graph_label: node.label.clone(),
                        });
                    }

                    if self.config.check_reachability
                        && !graph.is_reachable(&claim.role_uri, &claim.obligation_uri)
                    {
                        findings.push(ValidationFinding::new(
                            Severity::Critical,
                            &claim.obligation_uri,
                            format!(
                                "obligation '{}' is attributed to role '{}' but not reachable from it",
                                claim.obligation_uri, claim.role_uri
                            ),
                        ));
                    }
                }
            }

            if self.config.check_citations && claim.citation.is_none() {
                findings.push(ValidationFinding::new(
                    Severity::Minor,
                    &claim.obligation_uri,
                    format!(
                        "claim on obligation '{}' carries no citation",
                        claim.obligation_uri
                    ),
                ));
            }
        }

        let max_severity = findings.iter().map(|f| f.severity).max();
        let status = match max_severity.map(Remediation::for_severity) {
            None => ArtifactStatus::Accepted,
            Some(Remediation::Regenerate) => ArtifactStatus::Regenerated,
            Some(Remediation::Correct) => ArtifactStatus::Corrected,
            Some(Remediation::Flag) => ArtifactStatus::Flagged,
        };

        let corrected = if status == ArtifactStatus::Corrected {
            Some(apply_corrections(artifact, &corrections))
        } else {
            None
        };

        debug!(
            artifact = %artifact.id,
            status = %status,
            findings = findings.len(),
            "validated artifact"
        );

        ValidationReport {
            status,
            findings,
            corrected,
        }
    }
}

/// Case- and whitespace-insensitive label comparison
fn labels_match(a: &str, b: &str) -> bool {
    let norm = |s: &str| {
        s.split_whitespace()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    };
    norm(a) == norm(b)
}

/// Build the corrected replacement artifact: unknown-obligation claims are
/// removed, mismatched labels are substituted in both the claim and the text.
fn apply_corrections(artifact: &ReasoningArtifact, corrections: &[Correction]) -> ReasoningArtifact {
    let mut text = artifact.text.clone();
    let mut remove = vec![false; artifact.claims.len()];
    let mut claims = artifact.claims.clone();

    for correction in corrections {
        match correction {
            Correction::RemoveClaim(idx) => remove[*idx] = true,
            Correction::SubstituteLabel { claim, graph_label } => {
                let old_label = claims[*claim].obligation_label.clone();
                if !old_label.is_empty() {
                    text = text.replace(&old_label, graph_label);
                }
                claims[*claim].obligation_label = graph_label.clone();
            }
        }
    }

    let kept: Vec<_> = claims
        .into_iter()
        .zip(remove)
        .filter_map(|(claim, removed)| (!removed).then_some(claim))
        .collect();

    ReasoningArtifact::new(text, kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethos_domain::traits::{ConceptRelationship, KnowledgeBase};
    use ethos_domain::{ArtifactClaim, ConceptKind, ConceptNode, PrecedentCase};

    struct FixtureKb;

    impl KnowledgeBase for FixtureKb {
        type Error = String;

        fn get_concepts_by_kind(&self, kind: ConceptKind) -> Result<Vec<ConceptNode>, String> {
            let all = vec![
                ConceptNode::new("ethos:role/engineer", "Engineer", ConceptKind::Role, vec![]),
                ConceptNode::new("ethos:role/accountant", "Accountant", ConceptKind::Role, vec![]),
                ConceptNode::new(
                    "ethos:obligation/disclose-known-risks",
                    "Disclose Known Risks",
                    ConceptKind::Obligation,
                    vec![],
                ),
            ];
            Ok(all.into_iter().filter(|c| c.kind == kind).collect())
        }

        fn get_relationships(&self) -> Result<Vec<ConceptRelationship>, String> {
            // Only the engineer role carries the disclosure obligation
            Ok(vec![ConceptRelationship {
                child_uri: "ethos:obligation/disclose-known-risks".into(),
                parent_uri: "ethos:role/engineer".into(),
            }])
        }

        fn get_precedent_cases(&self) -> Result<Vec<PrecedentCase>, String> {
            Ok(vec![])
        }
    }

    fn graph() -> ConceptGraph {
        ConceptGraph::load(&FixtureKb).unwrap()
    }

    fn valid_claim() -> ArtifactClaim {
        ArtifactClaim {
            role_uri: "ethos:role/engineer".into(),
            obligation_uri: "ethos:obligation/disclose-known-risks".into(),
            obligation_label: "Disclose Known Risks".into(),
            citation: Some("Code II.1.a".into()),
        }
    }

    #[test]
    fn test_clean_artifact_accepted() {
        let validator = ConstraintValidator::default_config();
        let artifact = ReasoningArtifact::new("The engineer must disclose.", vec![valid_claim()]);

        let report = validator.validate(&artifact, &graph());

        assert_eq!(report.status, ArtifactStatus::Accepted);
        assert!(report.findings.is_empty());
        assert!(report.corrected.is_none());
    }

    #[test]
    fn test_unreachable_obligation_is_critical() {
        let validator = ConstraintValidator::default_config();
        let mut claim = valid_claim();
        claim.role_uri = "ethos:role/accountant".into();
        let artifact = ReasoningArtifact::new("text", vec![claim]);

        let report = validator.validate(&artifact, &graph());

        assert_eq!(report.status, ArtifactStatus::Regenerated);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Critical);
        assert_eq!(report.findings[0].remediation, Remediation::Regenerate);
        assert_eq!(
            report.critical_rule_uris(),
            vec!["ethos:obligation/disclose-known-risks"]
        );
        assert!(report.corrected.is_none());
    }

    #[test]
    fn test_unknown_role_is_critical() {
        let validator = ConstraintValidator::default_config();
        let mut claim = valid_claim();
        claim.role_uri = "ethos:role/nonexistent".into();
        let artifact = ReasoningArtifact::new("text", vec![claim]);

        let report = validator.validate(&artifact, &graph());
        assert_eq!(report.status, ArtifactStatus::Regenerated);
    }

    #[test]
    fn test_unknown_obligation_corrected_by_removal() {
        let validator = ConstraintValidator::default_config();
        let mut unknown = valid_claim();
        unknown.obligation_uri = "ethos:obligation/invented".into();
        let artifact = ReasoningArtifact::new("text", vec![valid_claim(), unknown]);

        let report = validator.validate(&artifact, &graph());

        assert_eq!(report.status, ArtifactStatus::Corrected);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Major);

        let corrected = report.corrected.unwrap();
        assert_eq!(corrected.claims.len(), 1);
        assert_eq!(
            corrected.claims[0].obligation_uri,
            "ethos:obligation/disclose-known-risks"
        );
        assert_ne!(corrected.id, artifact.id);
    }

    #[test]
    fn test_label_mismatch_corrected_by_substitution() {
        let validator = ConstraintValidator::default_config();
        let mut claim = valid_claim();
        claim.obligation_label = "Reveal All Hazards".into();
        let artifact =
            ReasoningArtifact::new("The engineer must Reveal All Hazards promptly.", vec![claim]);

        let report = validator.validate(&artifact, &graph());

        assert_eq!(report.status, ArtifactStatus::Corrected);
        let corrected = report.corrected.unwrap();
        assert_eq!(corrected.claims[0].obligation_label, "Disclose Known Risks");
        assert_eq!(
            corrected.text,
            "The engineer must Disclose Known Risks promptly."
        );
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        let validator = ConstraintValidator::default_config();
        let mut claim = valid_claim();
        claim.obligation_label = "disclose  known risks".into();
        let artifact = ReasoningArtifact::new("text", vec![claim]);

        let report = validator.validate(&artifact, &graph());
        assert_eq!(report.status, ArtifactStatus::Accepted);
    }

    #[test]
    fn test_missing_citation_flagged() {
        let validator = ConstraintValidator::default_config();
        let mut claim = valid_claim();
        claim.citation = None;
        let artifact = ReasoningArtifact::new("text", vec![claim]);

        let report = validator.validate(&artifact, &graph());

        assert_eq!(report.status, ArtifactStatus::Flagged);
        assert_eq!(report.findings[0].severity, Severity::Minor);
        assert_eq!(report.findings[0].remediation, Remediation::Flag);
        assert!(report.corrected.is_none());
    }

    #[test]
    fn test_critical_outranks_major_and_minor() {
        let validator = ConstraintValidator::default_config();
        let mut unreachable = valid_claim();
        unreachable.role_uri = "ethos:role/accountant".into();
        unreachable.citation = None;
        let mut unknown = valid_claim();
        unknown.obligation_uri = "ethos:obligation/invented".into();
        let artifact = ReasoningArtifact::new("text", vec![unreachable, unknown]);

        let report = validator.validate(&artifact, &graph());

        assert_eq!(report.status, ArtifactStatus::Regenerated);
        assert_eq!(report.findings.len(), 3);
        // Critical discards the artifact: no correction is attempted
        assert!(report.corrected.is_none());
    }

    #[test]
    fn test_correction_is_idempotent() {
        let validator = ConstraintValidator::default_config();
        let mut claim = valid_claim();
        claim.obligation_label = "Reveal All Hazards".into();
        let artifact = ReasoningArtifact::new("Must Reveal All Hazards.", vec![claim]);

        let graph = graph();
        let first = validator.validate(&artifact, &graph);
        let corrected = first.corrected.unwrap();
        let second = validator.validate(&corrected, &graph);

        assert_eq!(second.status, ArtifactStatus::Accepted);
        assert!(second.findings.is_empty());
    }

    #[test]
    fn test_same_inputs_same_report() {
        let validator = ConstraintValidator::default_config();
        let mut claim = valid_claim();
        claim.citation = None;
        let artifact = ReasoningArtifact::new("text", vec![claim]);
        let graph = graph();

        let first = validator.validate(&artifact, &graph);
        let second = validator.validate(&artifact, &graph);
        assert_eq!(first, second);
    }

    #[test]
    fn test_permissive_skips_citation_check() {
        let validator = ConstraintValidator::new(ValidatorConfig::permissive());
        let mut claim = valid_claim();
        claim.citation = None;
        let artifact = ReasoningArtifact::new("text", vec![claim]);

        let report = validator.validate(&artifact, &graph());
        assert_eq!(report.status, ArtifactStatus::Accepted);
    }

    #[test]
    fn test_strict_flags_empty_claims() {
        let validator = ConstraintValidator::new(ValidatorConfig::strict());
        let artifact = ReasoningArtifact::new("vague reasoning with no claims", vec![]);

        let report = validator.validate(&artifact, &graph());

        assert_eq!(report.status, ArtifactStatus::Flagged);
        assert_eq!(report.findings.len(), 1);
    }
}
