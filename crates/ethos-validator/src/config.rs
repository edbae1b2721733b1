//! Validator configuration

use crate::ValidatorError;
use serde::{Deserialize, Serialize};

/// Configuration for constraint checks and the remediation loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Check that each claimed obligation is reachable from its role
    pub check_reachability: bool,

    /// Check that each claimed obligation URI exists in the graph
    pub check_known_obligations: bool,

    /// Check that claim labels match the graph's labels
    pub check_labels: bool,

    /// Check that each claim carries a citation
    pub check_citations: bool,

    /// Flag artifacts that assert no structured claims at all
    pub require_claims: bool,

    /// Regeneration attempts allowed before falling back to Flagged
    pub max_regeneration_retries: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            check_reachability: true,
            check_known_obligations: true,
            check_labels: true,
            check_citations: true,
            require_claims: false,
            max_regeneration_retries: 2,
        }
    }
}

impl ValidatorConfig {
    /// All checks enabled, including the empty-claims check
    pub fn strict() -> Self {
        Self {
            require_claims: true,
            ..Self::default()
        }
    }

    /// Only the graph-consistency checks; citations and labels are not
    /// enforced
    pub fn permissive() -> Self {
        Self {
            check_reachability: true,
            check_known_obligations: true,
            check_labels: false,
            check_citations: false,
            require_claims: false,
            max_regeneration_retries: 2,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ValidatorError> {
        toml::from_str(toml_str)
            .map_err(|e| ValidatorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ValidatorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ValidatorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert!(config.check_reachability);
        assert!(config.check_citations);
        assert!(!config.require_claims);
        assert_eq!(config.max_regeneration_retries, 2);
    }

    #[test]
    fn test_permissive_skips_label_and_citation_checks() {
        let config = ValidatorConfig::permissive();
        assert!(!config.check_labels);
        assert!(!config.check_citations);
        assert!(config.check_reachability);
    }

    #[test]
    fn test_strict_requires_claims() {
        assert!(ValidatorConfig::strict().require_claims);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ValidatorConfig::strict();
        let toml_str = config.to_toml().unwrap();
        assert_eq!(ValidatorConfig::from_toml(&toml_str).unwrap(), config);
    }
}
