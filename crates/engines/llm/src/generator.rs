//! Text generation backends

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::GenerateError;

/// Something that continues a prompt with a short piece of text.
pub trait TextGenerator: Send {
    /// Generate at most `max_new_tokens` tokens after `prompt`, giving up
    /// after `timeout` if one is given.
    fn generate(
        &mut self,
        prompt: &str,
        max_new_tokens: u32,
        timeout: Option<Duration>,
    ) -> Result<String, GenerateError>;

    fn name(&self) -> &str;
}

/// Settings for an OpenAI-compatible completions server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Base URL, e.g. `http://localhost:11434`
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// Used when the caller gives no deadline
    pub request_timeout_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            model: "gpt2".to_string(),
            temperature: 0.7,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    stop: [&'a str; 1],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

/// Talks to `POST {endpoint}/v1/completions`.
pub struct HttpGenerator {
    client: reqwest::blocking::Client,
    settings: HttpSettings,
    url: String,
}

impl HttpGenerator {
    pub fn new(settings: HttpSettings) -> Self {
        let url = format!("{}/v1/completions", settings.endpoint.trim_end_matches('/'));
        Self {
            client: reqwest::blocking::Client::new(),
            settings,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextGenerator for HttpGenerator {
    fn generate(
        &mut self,
        prompt: &str,
        max_new_tokens: u32,
        timeout: Option<Duration>,
    ) -> Result<String, GenerateError> {
        let timeout =
            timeout.unwrap_or_else(|| Duration::from_millis(self.settings.request_timeout_ms));
        if timeout.is_zero() {
            return Err(GenerateError::OutOfTime);
        }

        let body = CompletionRequest {
            model: &self.settings.model,
            prompt,
            max_tokens: max_new_tokens,
            temperature: self.settings.temperature,
            stop: ["\n"],
        };

        let response = self
            .client
            .post(&self.url)
            .timeout(timeout)
            .json(&body)
            .send()
            .map_err(|source| GenerateError::Request {
                endpoint: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .map_err(|e| GenerateError::Response(e.to_string()))?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| GenerateError::Response("no choices".to_string()))?;

        debug!(completion = %text, "generator replied");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.settings.model
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod generator_tests;
