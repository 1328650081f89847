//! Ollama provider implementation for bubblechat
//!
//! This module implements the `ChatProvider` trait for Ollama, connecting
//! to a local or remote Ollama server through its `/api/chat` endpoint.

use crate::config::OllamaConfig;
use crate::error::{BubbleChatError, Result};
use crate::providers::base::{build_http_client, to_wire_messages, WireMessage};
use crate::providers::{ChatProvider, ChatReply};
use crate::session::Message;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Ollama API provider
///
/// # Examples
///
/// ```no_run
/// use bubblechat::config::OllamaConfig;
/// use bubblechat::providers::{ChatProvider, OllamaProvider};
/// use bubblechat::session::Message;
///
/// # async fn example() -> bubblechat::error::Result<()> {
/// let provider = OllamaProvider::new(OllamaConfig::default(), 120)?;
/// let reply = provider.chat(&[Message::user("Hello!")?]).await?;
/// println!("{}", reply.message);
/// # Ok(())
/// # }
/// ```
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for Ollama's /api/chat
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<WireMessage>,
    stream: bool,
}

/// Response structure from Ollama's /api/chat
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: WireMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Ollama configuration containing host and model
    /// * `timeout_seconds` - Per-request HTTP timeout
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use bubblechat::config::OllamaConfig;
    /// use bubblechat::providers::OllamaProvider;
    ///
    /// let provider = OllamaProvider::new(OllamaConfig::default(), 120);
    /// assert!(provider.is_ok());
    /// ```
    pub fn new(config: OllamaConfig, timeout_seconds: u64) -> Result<Self> {
        let client = build_http_client(timeout_seconds)?;

        tracing::info!(
            "Initialized Ollama provider: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured Ollama host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.config.host.trim_end_matches('/'))
    }

    fn build_request(&self, transcript: &[Message]) -> OllamaRequest {
        OllamaRequest {
            model: self.config.model.clone(),
            messages: to_wire_messages(transcript),
            stream: false,
        }
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    async fn chat(&self, transcript: &[Message]) -> Result<ChatReply> {
        let url = self.endpoint();
        let request = self.build_request(transcript);

        tracing::debug!("Sending Ollama request: {} messages", request.messages.len());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                BubbleChatError::Provider(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(BubbleChatError::Provider(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            BubbleChatError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            ollama_response.done,
            ollama_response.prompt_eval_count,
            ollama_response.eval_count
        );

        Ok(ChatReply::new(ollama_response.message.content))
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
