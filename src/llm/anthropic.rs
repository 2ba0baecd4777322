//! Anthropic Messages API client

use crate::llm::{ChatRequest, ChatResponse, LlmClient, LlmError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT_SECS: u64 = 600;

/// Client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new client. `base_url` overrides the default API
    /// endpoint (for proxies and compatible gateways).
    pub fn new(
        api_key: String,
        model: String,
        base_url: Option<String>,
    ) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            http,
            api_key,
            model,
            base_url,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &request.system_prompt,
            messages: vec![MessageParam {
                role: "user",
                content: &request.user_message,
            }],
        };

        debug!(
            model = %self.model,
            prompt_bytes = request.user_message.len(),
            "sending messages request"
        );

        let response = self
            .http
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_api_error(&raw),
            });
        }

        let parsed = parse_response(&raw)?;
        debug!(
            input_tokens = parsed.input_tokens,
            output_tokens = parsed.output_tokens,
            "messages request completed"
        );
        Ok(parsed)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Parse a successful Messages API body into the uniform response shape.
fn parse_response(raw: &str) -> Result<ChatResponse, LlmError> {
    let body: MessagesResponse = serde_json::from_str(raw)
        .map_err(|e| LlmError::MalformedResponse(format!("invalid JSON body: {e}")))?;

    let content = body
        .content
        .iter()
        .find(|block| block.kind == "text")
        .map(|block| block.text.clone())
        .ok_or_else(|| {
            LlmError::MalformedResponse("response contains no text content block".to_string())
        })?;

    Ok(ChatResponse {
        content,
        model: body.model,
        input_tokens: body.usage.input_tokens,
        output_tokens: body.usage.output_tokens,
    })
}

/// Pull the human-readable message out of an error body, falling back to
/// the raw text when it is not the documented envelope.
fn extract_api_error(raw: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(raw) {
        Ok(envelope) => envelope.error.message,
        Err(_) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                "empty error body".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}
