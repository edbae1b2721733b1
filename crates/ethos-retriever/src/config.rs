//! Scoring and retrieval configuration

use crate::RetrieverError;
use ethos_domain::{ConceptKind, SectionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance when checking that weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights for the four relevance sub-scores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of the embedding-similarity metric
    pub vector: f64,
    /// Weight of the shared-term metric
    pub term_overlap: f64,
    /// Weight of the section-type structural metric
    pub structural: f64,
    /// Weight of the caller-supplied external metric
    pub external: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            vector: 0.40,
            term_overlap: 0.25,
            structural: 0.20,
            external: 0.15,
        }
    }
}

impl ScoringWeights {
    /// Validate: every weight in [0, 1] and the sum is 1.0.
    pub fn validate(&self) -> Result<(), RetrieverError> {
        for (name, value) in [
            ("vector", self.vector),
            ("term_overlap", self.term_overlap),
            ("structural", self.structural),
            ("external", self.external),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RetrieverError::Config(format!(
                    "weight '{}' = {} outside [0.0, 1.0]",
                    name, value
                )));
            }
        }

        let sum = self.vector + self.term_overlap + self.structural + self.external;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RetrieverError::Config(format!(
                "weights sum to {}, expected 1.0",
                sum
            )));
        }
        Ok(())
    }
}

/// Additive boosts applied to the structural sub-score, keyed by
/// (section type, concept kind). Boosts add to the structural base before
/// the 0-1 clamp; they are never multiplicative, so a boost cannot turn an
/// otherwise-low score into a high one.
///
/// Stored as string-keyed nested maps so the table round-trips through TOML;
/// keys are checked against the known type/kind names at validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostTable {
    entries: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for BoostTable {
    fn default() -> Self {
        let mut entries: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        let mut insert = |section: SectionType, kind: ConceptKind, boost: f64| {
            entries
                .entry(section.as_str().to_string())
                .or_default()
                .insert(kind.as_str().to_string(), boost);
        };

        insert(SectionType::Facts, ConceptKind::Role, 0.4);
        insert(SectionType::Facts, ConceptKind::Resource, 0.4);
        insert(SectionType::Facts, ConceptKind::Event, 0.3);
        insert(SectionType::Facts, ConceptKind::State, 0.2);

        insert(SectionType::Issues, ConceptKind::Principle, 0.4);
        insert(SectionType::Issues, ConceptKind::Obligation, 0.2);
        insert(SectionType::Issues, ConceptKind::Capability, 0.2);

        insert(SectionType::Rules, ConceptKind::Obligation, 0.5);
        insert(SectionType::Rules, ConceptKind::Principle, 0.3);

        insert(SectionType::Analysis, ConceptKind::Principle, 0.4);
        insert(SectionType::Analysis, ConceptKind::Obligation, 0.4);
        insert(SectionType::Analysis, ConceptKind::State, 0.2);

        insert(SectionType::Conclusion, ConceptKind::Action, 0.4);
        insert(SectionType::Conclusion, ConceptKind::Obligation, 0.4);

        Self { entries }
    }
}

impl BoostTable {
    /// The boost for a (section type, concept kind) pair; 0.0 if absent.
    pub fn boost(&self, section_type: SectionType, kind: ConceptKind) -> f64 {
        self.entries
            .get(section_type.as_str())
            .and_then(|kinds| kinds.get(kind.as_str()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Validate keys and value ranges
    pub fn validate(&self) -> Result<(), RetrieverError> {
        for (section_key, kinds) in &self.entries {
            if SectionType::parse(section_key).is_none() {
                return Err(RetrieverError::Config(format!(
                    "unknown section type '{}' in boost table",
                    section_key
                )));
            }
            for (kind_key, boost) in kinds {
                if ConceptKind::parse(kind_key).is_none() {
                    return Err(RetrieverError::Config(format!(
                        "unknown concept kind '{}' in boost table",
                        kind_key
                    )));
                }
                if !(0.0..=1.0).contains(boost) {
                    return Err(RetrieverError::Config(format!(
                        "boost {}/{} = {} outside [0.0, 1.0]",
                        section_key, kind_key, boost
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Configuration for the scorer and retriever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Sub-score weights, validated to sum to 1.0
    pub weights: ScoringWeights,

    /// Structural boost table
    pub boosts: BoostTable,

    /// Structural sub-score before boosts are added
    pub structural_base: f64,

    /// Coarse-pass working set bound
    pub coarse_limit: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            boosts: BoostTable::default(),
            structural_base: 0.2,
            coarse_limit: 50,
        }
    }
}

impl RetrieverConfig {
    /// Validate the full configuration
    pub fn validate(&self) -> Result<(), RetrieverError> {
        self.weights.validate()?;
        self.boosts.validate()?;
        if !(0.0..=1.0).contains(&self.structural_base) {
            return Err(RetrieverError::Config(format!(
                "structural_base {} outside [0.0, 1.0]",
                self.structural_base
            )));
        }
        if self.coarse_limit == 0 {
            return Err(RetrieverError::Config(
                "coarse_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, RetrieverError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| RetrieverError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, RetrieverError> {
        toml::to_string_pretty(self)
            .map_err(|e| RetrieverError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
