//! Generation backend adapter
//!
//! Exposes a uniform single-turn chat contract regardless of provider.
//! The run controller only sees [`LlmClient`]; the concrete transport
//! lives in provider submodules.

pub mod anthropic;

use crate::core::config::Settings;
use async_trait::async_trait;
use std::str::FromStr;
use thiserror::Error;

pub use anthropic::AnthropicClient;

/// Error types for backend operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A single-turn generation request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from the backend.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    /// Model identifier as reported by the backend.
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Trait for generation backends - allows for different implementations
/// (and deterministic mocks in tests).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single-turn chat request and return the full response.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;
}

/// Backends this build actually supports. Provider names that are not
/// listed here are rejected when settings are parsed, so a misconfigured
/// provider can never reach a first stage execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(format!("unsupported provider: {other}")),
        }
    }
}

/// Build the backend client selected by the settings.
pub fn create_client(settings: &Settings) -> Result<Box<dyn LlmClient>, LlmError> {
    match settings.provider {
        Provider::Anthropic => Ok(Box::new(AnthropicClient::new(
            settings.api_key.clone(),
            settings.model.clone(),
            settings.base_url.clone(),
        )?)),
    }
}
