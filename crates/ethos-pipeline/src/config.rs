//! Pipeline configuration

use crate::PipelineError;
use ethos_parser::ParserConfig;
use ethos_retriever::RetrieverConfig;
use ethos_validator::ValidatorConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the whole advisory pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Structural parser configuration
    pub parser: ParserConfig,

    /// Scorer and retriever configuration
    pub retriever: RetrieverConfig,

    /// Constraint validator configuration
    pub validator: ValidatorConfig,

    /// Ranked candidates kept per section
    pub top_k: usize,

    /// Generation call timeout in milliseconds; on expiry the artifact is
    /// flagged instead of failing the pipeline
    pub generation_timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            retriever: RetrieverConfig::default(),
            validator: ValidatorConfig::default(),
            top_k: 5,
            generation_timeout_ms: 60_000,
        }
    }
}

impl PipelineConfig {
    /// Validate the full configuration
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.parser
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        self.retriever
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        if self.top_k == 0 {
            return Err(PipelineError::Config(
                "top_k must be greater than 0".to_string(),
            ));
        }
        if self.generation_timeout_ms == 0 {
            return Err(PipelineError::Config(
                "generation_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PipelineError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self)
            .map_err(|e| PipelineError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
