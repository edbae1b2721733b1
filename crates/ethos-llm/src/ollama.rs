//! Ollama generator adapter.
//!
//! Talks to a local Ollama instance over HTTP. The model is prompted to
//! answer with a JSON document carrying the reasoning text and its structured
//! claims; free-text answers degrade to an output with no claims rather than
//! an error.
//!
//! # Examples
//!
//! ```no_run
//! use ethos_llm::OllamaGenerator;
//!
//! let generator = OllamaGenerator::new("http://localhost:11434", "llama3").unwrap();
//! ```

use crate::GeneratorError;
use ethos_domain::traits::{GenerationOutput, Generator};
use ethos_domain::ArtifactClaim;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for generation requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API adapter for local model inference
pub struct OllamaGenerator {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaGenerator {
    /// Create a new Ollama generator.
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeneratorError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a generator against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, GeneratorError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Generate a reasoning output via the Ollama API.
    ///
    /// Retries transient failures with exponential backoff; a 404 means the
    /// model is not pulled and is not retried.
    pub async fn generate_async(&self, prompt: &str) -> Result<GenerationOutput, GeneratorError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(body) => Ok(parse_output(&body.response)),
                            Err(e) => Err(GeneratorError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(GeneratorError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(GeneratorError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(GeneratorError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| GeneratorError::Communication("Max retries exceeded".to_string())))
    }
}

impl Generator for OllamaGenerator {
    type Error = GeneratorError;

    fn generate(&self, prompt: &str) -> Result<GenerationOutput, Self::Error> {
        // Blocking wrapper; callers run this inside spawn_blocking
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| GeneratorError::Other(format!("Failed to start runtime: {}", e)))?;
        runtime.block_on(self.generate_async(prompt))
    }
}

/// Parse a model answer into a [`GenerationOutput`].
///
/// Expected shape:
///
/// ```json
/// {
///   "text": "...",
///   "claims": [
///     {"role_uri": "...", "obligation_uri": "...", "obligation_label": "...", "citation": "..."}
///   ],
///   "semantic_score": 0.8
/// }
/// ```
///
/// Anything that is not that JSON document is treated as free text with no
/// claims. Claims missing a role or obligation URI are skipped.
fn parse_output(raw: &str) -> GenerationOutput {
    let value: serde_json::Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(_) => {
            return GenerationOutput {
                text: raw.to_string(),
                claims: vec![],
                semantic_score: None,
            };
        }
    };

    let text = value
        .get("text")
        .and_then(|v| v.as_str())
        .unwrap_or(raw)
        .to_string();

    let mut claims = Vec::new();
    if let Some(entries) = value.get("claims").and_then(|v| v.as_array()) {
        for entry in entries {
            let role_uri = entry.get("role_uri").and_then(|v| v.as_str());
            let obligation_uri = entry.get("obligation_uri").and_then(|v| v.as_str());
            let (role_uri, obligation_uri) = match (role_uri, obligation_uri) {
                (Some(r), Some(o)) => (r, o),
                _ => {
                    warn!("skipping claim without role/obligation URIs");
                    continue;
                }
            };

            claims.push(ArtifactClaim {
                role_uri: role_uri.to_string(),
                obligation_uri: obligation_uri.to_string(),
                obligation_label: entry
                    .get("obligation_label")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
                citation: entry
                    .get("citation")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            });
        }
    }

    let semantic_score = value.get("semantic_score").and_then(|v| v.as_f64());

    GenerationOutput {
        text,
        claims,
        semantic_score,
    }
}
