//! Model clients: the transport seam between the generator and a hosted model.
//!
//! [`ModelClient`] is the trait the generator prompts through. The shipped
//! implementation is [`HttpModelClient`], which speaks the Workers AI style
//! run endpoint: `POST {base_url}/{model}` with a bearer token and a
//! `{ prompt, max_tokens, temperature }` body. Tests substitute scripted
//! clients instead of standing up a server.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};

/// Default model identifier for the run endpoint.
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";

/// Default completion token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Default sampling temperature. Low on purpose: rule generation wants
/// determinism over creativity.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client that can run one prompt against a model and return the raw
/// reply text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one prompt and return the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl ModelClient for Box<dyn ModelClient> {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt).await
    }
}

/// Connection settings for [`HttpModelClient`].
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Run endpoint base, e.g.
    /// `https://api.cloudflare.com/client/v4/accounts/<id>/ai/run`.
    /// The model name is appended as the final path segment.
    pub base_url: String,

    /// Model identifier.
    pub model: String,

    /// Bearer token for the endpoint.
    pub api_token: String,

    /// Completion token budget per request.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_token: String::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct RunRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

/// Reply envelope of the run endpoint: `{ "result": { "response": ... },
/// "success": true }`.
#[derive(Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    success: bool,
}

#[derive(Deserialize)]
struct RunResult {
    #[serde(default)]
    response: Option<String>,
}

/// HTTP client for a Workers AI style run endpoint.
pub struct HttpModelClient {
    http: reqwest::Client,
    config: ModelConfig,
}

impl HttpModelClient {
    /// Build a client from connection settings.
    pub fn new(config: ModelConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn run_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = RunRequest {
            prompt,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(self.run_url())
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: RunEnvelope = response.json().await?;
        if !envelope.success {
            tracing::debug!("run endpoint replied 2xx with success=false");
        }

        match envelope.result.and_then(|r| r.response) {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenerateError::EmptyReply),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 500);
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn run_url_joins_base_and_model() {
        let client = HttpModelClient::new(ModelConfig {
            base_url: "https://api.example.com/ai/run/".to_string(),
            model: "@cf/meta/llama-3.1-8b-instruct".to_string(),
            ..ModelConfig::default()
        })
        .unwrap();

        assert_eq!(
            client.run_url(),
            "https://api.example.com/ai/run/@cf/meta/llama-3.1-8b-instruct"
        );
    }

    #[test]
    fn envelope_decodes_nested_response() {
        let envelope: RunEnvelope =
            serde_json::from_str(r#"{"result":{"response":"{}"},"success":true}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.result.and_then(|r| r.response).as_deref(), Some("{}"));
    }
}
