/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` - Interactive chat session
- `ask`  - Send a single message and print the reply

Both build a `Session` on the configured provider and a terminal display.
*/

use crate::config::Config;
use crate::display::TerminalDisplay;
use crate::error::Result;
use crate::providers::create_provider;
use crate::session::Session;
use std::sync::Arc;

// Special commands parser for the interactive loop
pub mod special_commands;

/// Builds a session on the configured provider, printing to the terminal
fn start_session(config: &Config) -> Result<Session> {
    let provider = create_provider(&config.provider.provider_type, &config.provider)?;
    let display = Arc::new(TerminalDisplay::new(config.chat.show_timestamps));
    Ok(Session::new_boxed(provider, display, &config.chat))
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline-based loop that submits each line to the session.
    //! Special commands are handled locally and never reach the chat service.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::session::TurnOutcome;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::future::Future;

    const PROMPT: &str = "> ";

    /// Start interactive chat mode
    ///
    /// The loop reads one line at a time and awaits the reply before
    /// prompting again, so a session never has two requests in flight.
    /// Ctrl-C while waiting cancels the pending reply; Ctrl-C or Ctrl-D at
    /// the prompt ends the session.
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the provider or the line editor cannot be created
    ///
    /// # Examples
    ///
    /// ```
    /// use bubblechat::commands::chat;
    /// use bubblechat::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default()).await?;
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let mut session = start_session(&config)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&session);

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::History) => {
                            println!("{}", session.transcript().to_json()?);
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status_display(&session);
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    match submit_or_cancel(&mut session, trimmed, ctrl_c()).await {
                        Some(outcome) => tracing::debug!(?outcome, "Turn finished"),
                        None => {
                            tracing::info!("Pending reply cancelled");
                            println!("{}", "Cancelled".yellow());
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Runs one turn unless `cancel` resolves first
    ///
    /// Returns `None` when cancelled. The unfinished turn has been dropped by
    /// then, so the loading indicator is already hidden.
    async fn submit_or_cancel(
        session: &mut Session,
        line: &str,
        cancel: impl Future<Output = ()>,
    ) -> Option<TurnOutcome> {
        tokio::select! {
            outcome = session.submit(line) => Some(outcome),
            _ = cancel => None,
        }
    }

    /// Resolves on Ctrl-C; never resolves if the handler cannot be installed
    async fn ctrl_c() {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(session: &Session) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║               bubblechat - Interactive Chat                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Provider: {} ({})\n",
            session.provider_name().cyan(),
            session.model()
        );
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display status information about the current session
    ///
    /// Called when the user types `/status`.
    fn print_status_display(session: &Session) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    bubblechat Session Status                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Provider:          {}", session.provider_name().cyan());
        println!("Model:             {}", session.model());
        println!(
            "Conversation Size: {} messages",
            session.transcript().len()
        );
        println!("Replies Received:  {}", session.turns());
        println!();
    }

}

// Ask command handler
pub mod ask {
    //! One-shot handler: a single turn through the same session machinery
    //! the interactive loop uses.

    use super::*;
    use crate::error::BubbleChatError;
    use crate::session::TurnOutcome;

    /// Send a single message and print both bubbles
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `prompt` - Message to send
    ///
    /// # Errors
    ///
    /// Returns `BubbleChatError::EmptyMessage` for a blank prompt and
    /// `BubbleChatError::ServiceCallFailed` when no reply was received.
    /// In the latter case the fallback bubble has already been printed.
    pub async fn run_ask(config: Config, prompt: String) -> Result<()> {
        let mut session = start_session(&config)?;

        match session.submit(&prompt).await {
            TurnOutcome::Replied(_) => Ok(()),
            TurnOutcome::Ignored => Err(BubbleChatError::EmptyMessage.into()),
            TurnOutcome::Failed => Err(BubbleChatError::ServiceCallFailed(format!(
                "{} did not return a reply",
                session.provider_name()
            ))
            .into()),
        }
    }

}
