//! bubblechat - terminal chat client for AI chat services
//!
//! This library provides a conversation session that keeps an append-only
//! transcript, relays the whole transcript to a chat service on every turn,
//! and renders user, assistant, and error bubbles on a display surface.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Transcript and the turn-taking session
//! - `display`: Bubble rendering surfaces (terminal, in-memory)
//! - `providers`: Chat service abstraction and implementations (Ollama, OpenAI)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers for the CLI commands
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bubblechat::display::TerminalDisplay;
//! use bubblechat::providers::create_provider;
//! use bubblechat::{Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider.provider_type, &config.provider)?;
//!     let display = Arc::new(TerminalDisplay::new(config.chat.show_timestamps));
//!     let mut session = Session::new_boxed(provider, display, &config.chat);
//!     session.submit("Hello").await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use display::{Bubble, BubbleKind, DisplaySurface};
pub use error::{BubbleChatError, Result};
pub use providers::{ChatProvider, ChatReply};
pub use session::{Message, Role, Session, Transcript, TurnOutcome};

#[cfg(test)]
pub mod test_utils;
