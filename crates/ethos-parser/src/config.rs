//! Parser configuration

use crate::ParserError;
use serde::{Deserialize, Serialize};

/// Configuration for the FIRAC parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Sections with confidence below this floor are retained but flagged
    /// low-confidence (logged); callers decide whether to use them
    pub confidence_floor: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 0.3,
        }
    }
}

impl ParserConfig {
    /// Lenient preset: lower floor, fewer sections flagged
    pub fn lenient() -> Self {
        Self {
            confidence_floor: 0.15,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ParserError> {
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ParserError::Config(format!(
                "confidence_floor {} outside [0.0, 1.0]",
                self.confidence_floor
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ParserError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ParserError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ParserError> {
        toml::to_string_pretty(self)
            .map_err(|e| ParserError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
