//! Text-completion capability
//!
//! A single blocking request/response call against the Anthropic Messages
//! API. The pipeline runs one query at a time with no cooperative
//! suspension points, so the blocking reqwest client is used directly; there
//! is no retry, timeout, or streaming here.

use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Completion capability seam
///
/// Object-safe so the ranking service and brief generator can run against
/// stubs in tests.
pub trait Completion {
    /// Send one prompt, return the completion text
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Configuration for the completion client
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Model to use
    pub model: String,

    /// Max tokens for responses
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Anthropic API message format
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: usize,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Anthropic API response format
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    text: String,
}

/// Blocking client for the Anthropic Messages API
pub struct AnthropicClient {
    config: CompletionConfig,
    client: reqwest::blocking::Client,
}

impl AnthropicClient {
    /// Create a new client with custom config
    pub fn new(config: CompletionConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(PrepError::Config(config::ConfigError::Message(
                "ANTHROPIC_API_KEY not set".to_string(),
            )));
        }

        Ok(Self {
            config,
            client: reqwest::blocking::Client::new(),
        })
    }

    /// Create with default config
    pub fn with_default() -> Result<Self> {
        Self::new(CompletionConfig::default())
    }
}

impl Completion for AnthropicClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Calling Anthropic API");

        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(PrepError::Completion(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: AnthropicResponse = response
            .json()
            .map_err(|e| PrepError::Completion(format!("Failed to parse response: {}", e)))?;

        api_response
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| PrepError::Completion("Empty response from API".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let config = CompletionConfig {
            api_key: String::new(),
            ..CompletionConfig::default()
        };
        assert!(AnthropicClient::new(config).is_err());
    }

    #[test]
    fn test_client_with_key() {
        let config = CompletionConfig {
            api_key: "sk-ant-test".to_string(),
            ..CompletionConfig::default()
        };
        assert!(AnthropicClient::new(config).is_ok());
    }
}
