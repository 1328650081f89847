//! Provider module for bubblechat
//!
//! This module contains the chat service abstraction and its
//! implementations for Ollama and OpenAI-compatible endpoints.

pub mod base;
pub mod ollama;
pub mod openai;

pub use base::{ChatProvider, ChatReply};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::{BubbleChatError, Result};

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `provider_type` - Type of provider ("ollama" or "openai")
/// * `config` - Provider configuration
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if provider type is invalid or initialization fails
///
/// # Examples
///
/// ```
/// use bubblechat::config::ProviderConfig;
/// use bubblechat::providers::{create_provider, ChatProvider};
///
/// let provider = create_provider("ollama", &ProviderConfig::default()).unwrap();
/// assert_eq!(provider.name(), "ollama");
/// ```
pub fn create_provider(
    provider_type: &str,
    config: &ProviderConfig,
) -> Result<Box<dyn ChatProvider>> {
    let timeout = config.request_timeout_seconds;
    match provider_type {
        "ollama" => Ok(Box::new(OllamaProvider::new(config.ollama.clone(), timeout)?)),
        "openai" => Ok(Box::new(OpenAiProvider::new(config.openai.clone(), timeout)?)),
        _ => Err(BubbleChatError::Provider(format!(
            "Unknown provider type: {}",
            provider_type
        ))
        .into()),
    }
}
