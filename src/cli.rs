//! Command-line interface definition for bubblechat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing an interactive chat command and a one-shot ask command.

use clap::{Parser, Subcommand};

/// bubblechat - chat with an AI service from the terminal
///
/// Every turn sends the whole conversation so far to the configured
/// chat service and prints the reply as a timestamped bubble.
#[derive(Parser, Debug, Clone)]
#[command(name = "bubblechat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for bubblechat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the provider from config (ollama, openai)
        #[arg(short, long)]
        provider: Option<String>,

        /// Override the model of the selected provider
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Send a single message and print the reply
    Ask {
        /// Override the provider from config (ollama, openai)
        #[arg(short, long)]
        provider: Option<String>,

        /// Override the model of the selected provider
        #[arg(short, long)]
        model: Option<String>,

        /// Message to send
        prompt: String,
    },
}

impl Commands {
    /// Provider and model overrides carried by the command
    pub fn provider_overrides(&self) -> (Option<&str>, Option<&str>) {
        match self {
            Commands::Chat { provider, model } | Commands::Ask { provider, model, .. } => {
                (provider.as_deref(), model.as_deref())
            }
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
