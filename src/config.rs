//! Configuration management for bubblechat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{BubbleChatError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback bubble shown when the chat service call fails
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, there was an error. Please try again.";

/// Provider types accepted by [`Config::validate`]
pub const VALID_PROVIDERS: [&str; 2] = ["ollama", "openai"];

/// Main configuration structure for bubblechat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat service configuration
    pub provider: ProviderConfig,
    /// Session and rendering configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Provider configuration
///
/// Specifies which chat service to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// HTTP timeout applied to every chat request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// OpenAI-compatible endpoint configuration
    #[serde(default)]
    pub openai: OpenAiConfig,
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: "ollama".to_string(),
            request_timeout_seconds: default_request_timeout(),
            ollama: OllamaConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Model name configured for the active provider
    pub fn active_model(&self) -> &str {
        match self.provider_type.as_str() {
            "openai" => &self.openai.model,
            _ => &self.ollama.model,
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// OpenAI-compatible provider configuration
///
/// Works with any server exposing `/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL, without the trailing `/chat/completions`
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Model to request
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Bearer token; omitted from requests when unset
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_base: default_openai_api_base(),
            model: default_openai_model(),
            api_key: None,
        }
    }
}

/// Chat session configuration
///
/// Controls what the session renders: the fallback bubble text and
/// the timestamp label attached to each bubble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Text of the bubble rendered when the service call fails
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// chrono format string for bubble timestamps
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Print the timestamp label in the terminal
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

fn default_timestamp_format() -> String {
    "%H:%M".to_string()
}

fn default_show_timestamps() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fallback_message: default_fallback_message(),
            timestamp_format: default_timestamp_format(),
            show_timestamps: default_show_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("Failed to read config file {}: {}", path, e);
            BubbleChatError::from(e)
        })?;
        serde_yaml::from_str(&contents).map_err(|e| {
            tracing::error!("Failed to parse config file {}: {}", path, e);
            BubbleChatError::from(e).into()
        })
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("BUBBLECHAT_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(timeout) = std::env::var("BUBBLECHAT_REQUEST_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(value) => self.provider.request_timeout_seconds = value,
                Err(_) => {
                    tracing::warn!("Invalid BUBBLECHAT_REQUEST_TIMEOUT_SECONDS: {}", timeout)
                }
            }
        }

        if let Ok(host) = std::env::var("BUBBLECHAT_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("BUBBLECHAT_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Ok(api_base) = std::env::var("BUBBLECHAT_OPENAI_API_BASE") {
            self.provider.openai.api_base = api_base;
        }

        if let Ok(model) = std::env::var("BUBBLECHAT_OPENAI_MODEL") {
            self.provider.openai.model = model;
        }

        let api_key = std::env::var("BUBBLECHAT_OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok();
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            tracing::debug!("Using OpenAI API key from environment");
            self.provider.openai.api_key = Some(key);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let (provider, model) = cli.command.provider_overrides();

        if let Some(provider) = provider {
            tracing::debug!("Using provider override: {}", provider);
            self.provider.provider_type = provider.to_string();
        }

        if let Some(model) = model {
            tracing::debug!("Using model override: {}", model);
            match self.provider.provider_type.as_str() {
                "openai" => self.provider.openai.model = model.to_string(),
                _ => self.provider.ollama.model = model.to_string(),
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `BubbleChatError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(BubbleChatError::Config("Provider type cannot be empty".to_string()).into());
        }

        if !VALID_PROVIDERS.contains(&self.provider.provider_type.as_str()) {
            return Err(BubbleChatError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                VALID_PROVIDERS.join(", ")
            ))
            .into());
        }

        if self.provider.request_timeout_seconds == 0 {
            return Err(BubbleChatError::Config(
                "provider.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.active_model().trim().is_empty() {
            return Err(BubbleChatError::Config(format!(
                "provider.{}.model cannot be empty",
                self.provider.provider_type
            ))
            .into());
        }

        if self.chat.fallback_message.trim().is_empty() {
            return Err(BubbleChatError::Config(
                "chat.fallback_message cannot be empty".to_string(),
            )
            .into());
        }

        if self.chat.timestamp_format.is_empty() {
            return Err(BubbleChatError::Config(
                "chat.timestamp_format cannot be empty".to_string(),
            )
            .into());
        }

        let mut items = StrftimeItems::new(&self.chat.timestamp_format);
        if items.any(|item| matches!(item, Item::Error)) {
            return Err(BubbleChatError::Config(format!(
                "chat.timestamp_format is not a valid strftime pattern: {}",
                self.chat.timestamp_format
            ))
            .into());
        }

        Ok(())
    }
}
