//! Shared test utilities: mock backend clients and settings

// Not every test target uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use newsroom::core::config::ENV_API_KEY;
use newsroom::{ChatRequest, ChatResponse, LlmClient, LlmError, Settings};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock client that returns predefined replies in order.
///
/// Records every user message it receives, so tests can assert how
/// stage outputs chain into the next stage's input.
pub struct MockClient {
    replies: Arc<Vec<String>>,
    index: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockClient {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Arc::new(replies.into_iter().map(String::from).collect()),
            index: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle for reading recorded prompts after the client has been
    /// boxed and handed to a runner.
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        self.prompts.clone()
    }

    /// Number of chat calls made so far.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.index.clone()
    }
}

#[async_trait]
impl LlmClient for MockClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(request.user_message.clone());

        let reply = self.replies.get(idx).ok_or_else(|| LlmError::Api {
            status: 500,
            message: format!(
                "no reply scripted for request {} (have {})",
                idx + 1,
                self.replies.len()
            ),
        })?;

        Ok(ChatResponse {
            content: reply.clone(),
            model: "mock-model".to_string(),
            input_tokens: 100,
            output_tokens: 200,
        })
    }
}

/// Client that succeeds for the first `succeed_for` calls, then fails
/// every call after that.
pub struct FlakyClient {
    succeed_for: usize,
    index: AtomicUsize,
}

impl FlakyClient {
    pub fn failing_after(succeed_for: usize) -> Self {
        Self {
            succeed_for,
            index: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmClient for FlakyClient {
    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        if idx < self.succeed_for {
            Ok(ChatResponse {
                content: format!("output {}", idx + 1),
                model: "mock-model".to_string(),
                input_tokens: 10,
                output_tokens: 20,
            })
        } else {
            Err(LlmError::Api {
                status: 529,
                message: "overloaded".to_string(),
            })
        }
    }
}

pub fn test_settings() -> Settings {
    Settings::from_lookup(|key| (key == ENV_API_KEY).then(|| "sk-test".to_string()))
        .expect("test settings")
}
