//! Base provider trait and common types for bubblechat
//!
//! This module defines the `ChatProvider` trait every chat service client
//! implements, the reply type, and the `{role, content}` wire message both
//! supported APIs share.

use crate::error::{BubbleChatError, Result};
use crate::session::Message;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reply returned by a chat service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant text
    pub message: String,
}

impl ChatReply {
    /// Creates a reply
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Client for an external AI chat service
///
/// Implementations receive the full transcript on every call and return
/// the assistant's reply. Authentication, transport, and retry policy are
/// entirely the implementation's concern.
///
/// # Examples
///
/// ```no_run
/// use bubblechat::providers::{ChatProvider, ChatReply};
/// use bubblechat::session::Message;
/// use bubblechat::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl ChatProvider for EchoProvider {
///     async fn chat(&self, transcript: &[Message]) -> Result<ChatReply> {
///         let last = transcript.last().map(|m| m.content()).unwrap_or_default();
///         Ok(ChatReply::new(last))
///     }
///
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn model(&self) -> String {
///         "echo-1".to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends the transcript and waits for the reply
    ///
    /// # Arguments
    ///
    /// * `transcript` - Every message of the conversation, oldest first
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the service answers with a
    /// non-success status, or the response cannot be decoded
    async fn chat(&self, transcript: &[Message]) -> Result<ChatReply>;

    /// Short provider identifier ("ollama", "openai")
    fn name(&self) -> &str;

    /// Model requested from the service
    fn model(&self) -> String;
}

/// Message in the `{role, content}` shape both supported APIs accept
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireMessage {
    pub(crate) role: String,
    #[serde(default)]
    pub(crate) content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
        }
    }
}

/// Converts a transcript to wire messages, preserving order
pub(crate) fn to_wire_messages(transcript: &[Message]) -> Vec<WireMessage> {
    transcript.iter().map(WireMessage::from).collect()
}

/// Builds the HTTP client shared by the providers
pub(crate) fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("bubblechat/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            BubbleChatError::Provider(format!("Failed to create HTTP client: {}", e)).into()
        })
}
