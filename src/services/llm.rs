//! Generative-text service
//!
//! Wraps the Anthropic messages API behind [`TextGenerator`] so the
//! generation pipeline can run against a mock or scripted collaborator.
//! Responses are classified by status so the retry wrapper can tell
//! rate-limit and overload conditions from everything else.

use crate::error::{Result, ThemeError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::debug;

/// Anthropic's "overloaded" status
const STATUS_OVERLOADED: u16 = 529;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for the LLM service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Anthropic API key
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Model to use (default: claude-3-5-sonnet-20241022)
    pub model: String,

    /// Max tokens for responses
    pub max_tokens: u32,

    pub base_url: String,

    /// Temperature for the base configuration call
    pub config_temperature: f32,

    /// Temperature for the marketing copy call
    pub content_temperature: f32,

    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 4000,
            base_url: "https://api.anthropic.com/v1".to_string(),
            config_temperature: 0.7,
            content_temperature: 0.8,
            request_timeout_secs: 120,
        }
    }
}

/// One request to the generative-text collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Anything that turns a prompt into text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    fn model_name(&self) -> String;
}

/// LLM service backed by the Anthropic messages API
pub struct LlmService {
    config: LlmConfig,
    client: Client,
}

/// Anthropic API message format
#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Anthropic API response format
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    text: String,
}

impl LlmService {
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ThemeError::Config(config::ConfigError::Message(
                "ANTHROPIC_API_KEY not set".to_string(),
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create with default config
    pub fn with_default() -> Result<Self> {
        Self::new(LlmConfig::default())
    }

    /// Call the messages endpoint once (no retry)
    async fn call_api(&self, request: &GenerationRequest) -> Result<String> {
        debug!(
            "Calling Anthropic API: model {}, temperature {}",
            self.config.model, request.temperature
        );

        let body = AnthropicRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: request.temperature,
            system: &request.system,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.config.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &error_text));
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ThemeError::LlmApi(format!("Failed to parse response: {}", e)))?;

        let text = api_response
            .content
            .into_iter()
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            return Err(ThemeError::LlmApi("Empty response from API".to_string()));
        }

        debug!("Generated {} characters", text.len());
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.call_api(request).await
    }

    fn model_name(&self) -> String {
        self.config.model.clone()
    }
}

/// Map a failed response to the error class the retry wrapper expects
pub fn classify_failure(status: StatusCode, body: &str) -> ThemeError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ThemeError::Authentication("Invalid or missing API key".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => ThemeError::RateLimitExceeded(format!(
            "Anthropic rate limit exceeded: {}",
            body.trim()
        )),
        StatusCode::SERVICE_UNAVAILABLE => ThemeError::ServiceOverloaded(format!(
            "Anthropic unavailable (status {}): {}",
            status,
            body.trim()
        )),
        _ if status.as_u16() == STATUS_OVERLOADED || body.contains("overloaded_error") => {
            ThemeError::ServiceOverloaded(format!(
                "Anthropic overloaded (status {}): {}",
                status,
                body.trim()
            ))
        }
        _ => ThemeError::LlmApi(format!(
            "API request failed with status {}: {}",
            status, body
        )),
    }
}
