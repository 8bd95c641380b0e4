use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::generate::{strip_prompt_echo, Generator};
use crate::{Error, Result};

/// Default address of a local Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default generation model; small enough to run on a laptop CPU.
pub const DEFAULT_MODEL: &str = "qwen2.5:0.5b-instruct";

/// Generation backend talking to an Ollama-compatible HTTP server.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaGenerator {
    /// Create a generator for the given server and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Generation(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            client,
        })
    }
}

impl Generator for OllamaGenerator {
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_new_tokens,
                temperature: 0.3,
                top_p: 0.9,
            },
        };

        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| Error::Generation(format!("failed to call {url}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::Generation(format!(
                "generation server returned {status}: {text}"
            )));
        }

        let parsed: GenerateResponse = resp
            .json()
            .map_err(|e| Error::Generation(format!("failed to parse generation response: {e}")))?;

        Ok(strip_prompt_echo(prompt, &parsed.response).to_string())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: usize,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
