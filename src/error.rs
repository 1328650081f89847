//! Error types for bubblechat
//!
//! This module defines the error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for bubblechat operations
///
/// Covers configuration loading, provider interactions and transcript
/// construction.
#[derive(Error, Debug)]
pub enum BubbleChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (client setup, HTTP status, response decoding)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The chat service call failed for any reason
    ///
    /// The session never propagates this; it is logged and replaced by the
    /// fallback bubble.
    #[error("Chat service call failed: {0}")]
    ServiceCallFailed(String),

    /// Attempted to build a message with no content
    #[error("Message content cannot be empty")]
    EmptyMessage,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for bubblechat operations
///
/// Uses `anyhow::Error` so callers can attach context while still
/// downcasting to [`BubbleChatError`] when they need the kind.
pub type Result<T> = anyhow::Result<T>;
