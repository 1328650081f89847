//! OpenAI-compatible provider implementation for bubblechat
//!
//! Talks to any server exposing the `/chat/completions` endpoint
//! (OpenAI, llama.cpp server, vLLM, LM Studio, ...).

use crate::config::OpenAiConfig;
use crate::error::{BubbleChatError, Result};
use crate::providers::base::{build_http_client, to_wire_messages, WireMessage};
use crate::providers::{ChatProvider, ChatReply};
use crate::session::Message;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

/// Request body for /chat/completions
#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
}

/// Response body from /chat/completions
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl OpenAiProvider {
    /// Create a new OpenAI-compatible provider
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, model, and optional API key
    /// * `timeout_seconds` - Per-request HTTP timeout
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OpenAiConfig, timeout_seconds: u64) -> Result<Self> {
        let client = build_http_client(timeout_seconds)?;

        if config.api_key.is_none() {
            tracing::warn!("No API key configured for {}", config.api_base);
        }

        tracing::info!(
            "Initialized OpenAI-compatible provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn build_request(&self, transcript: &[Message]) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: to_wire_messages(transcript),
        }
    }

    fn extract_reply(response: CompletionResponse) -> Result<ChatReply> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                BubbleChatError::Provider("Completion response contained no message".to_string())
            })?;

        Ok(ChatReply::new(content))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn chat(&self, transcript: &[Message]) -> Result<ChatReply> {
        let url = self.endpoint();
        let request = self.build_request(transcript);

        tracing::debug!(
            "Sending chat completion request: {} messages",
            request.messages.len()
        );

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Chat completion request failed: {}", e);
            BubbleChatError::Provider(format!("Chat completion request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Chat completion returned error {}: {}", status, error_text);
            return Err(BubbleChatError::Provider(format!(
                "Chat completion returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion response: {}", e);
            BubbleChatError::Provider(format!("Failed to parse chat completion response: {}", e))
        })?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                "Chat completion usage: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Self::extract_reply(completion)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
