//! Text generation backends
//!
//! The retrieval core never depends on generation succeeding; it hands a
//! finished prompt to a [`Generator`] and returns whatever comes back. The
//! backend is a stateless request/response collaborator with no
//! conversation memory between calls.

use crate::{Error, Result};

/// Trait implemented by concrete generation backends.
pub trait Generator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// Returns only newly generated text: a backend that echoes the prompt
    /// must strip the echo before returning.
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String>;
}

/// Placeholder backend for pipelines that only retrieve.
pub struct NoGenerator;

impl Generator for NoGenerator {
    fn generate(&self, _prompt: &str, _max_new_tokens: usize) -> Result<String> {
        Err(Error::Generation(
            "no generation backend configured".to_string(),
        ))
    }
}

/// Drop a leading prompt echo from a model's raw output.
pub(crate) fn strip_prompt_echo<'a>(prompt: &str, output: &'a str) -> &'a str {
    output.strip_prefix(prompt).unwrap_or(output).trim()
}

mod ollama;

pub use ollama::*;
