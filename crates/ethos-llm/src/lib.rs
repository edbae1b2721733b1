//! Generation backends.
//!
//! This crate provides implementations of the `Generator` trait from
//! `ethos-domain`: a deterministic mock for testing and an Ollama HTTP
//! adapter for local inference.
//!
//! # Examples
//!
//! ```
//! use ethos_llm::MockGenerator;
//! use ethos_domain::traits::Generator;
//!
//! let generator = MockGenerator::new("The engineer must disclose the flaw.");
//! let output = generator.generate("test prompt").unwrap();
//! assert_eq!(output.text, "The engineer must disclose the flaw.");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use ethos_domain::traits::{GenerationOutput, Generator};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaGenerator;

/// Errors that can occur during generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the backend
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Generation error: {0}")]
    Other(String),
}

/// Mock generator for deterministic testing.
///
/// Returns pre-configured outputs without making any network calls. Outputs
/// can be keyed by prompt, queued in order (useful for exercising
/// regeneration loops, where each retry prompt differs), or left to fall
/// through to a fixed default.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_output: GenerationOutput,
    responses: Arc<Mutex<HashMap<String, GenerationOutput>>>,
    queue: Arc<Mutex<VecDeque<GenerationOutput>>>,
    errors: Arc<Mutex<HashMap<String, ()>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerator {
    /// Create a mock that returns the given text (with no claims) for all
    /// prompts
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_output(GenerationOutput {
            text: text.into(),
            claims: vec![],
            semantic_score: None,
        })
    }

    /// Create a mock that returns the given output for all prompts
    pub fn with_output(output: GenerationOutput) -> Self {
        Self {
            default_output: output,
            responses: Arc::new(Mutex::new(HashMap::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            errors: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific output for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, output: GenerationOutput) {
        self.responses.lock().unwrap().insert(prompt.into(), output);
    }

    /// Queue an output; queued outputs are returned in order before any
    /// prompt-keyed or default output is considered
    pub fn push_output(&self, output: GenerationOutput) {
        self.queue.lock().unwrap().push_back(output);
    }

    /// Configure an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.errors.lock().unwrap().insert(prompt.into(), ());
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Default mock reasoning")
    }
}

impl Generator for MockGenerator {
    type Error = GeneratorError;

    fn generate(&self, prompt: &str) -> Result<GenerationOutput, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.errors.lock().unwrap().contains_key(prompt) {
            return Err(GeneratorError::Other("Mock error".to_string()));
        }

        if let Some(output) = self.queue.lock().unwrap().pop_front() {
            return Ok(output);
        }

        if let Some(output) = self.responses.lock().unwrap().get(prompt) {
            return Ok(output.clone());
        }

        Ok(self.default_output.clone())
    }
}
