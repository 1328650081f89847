//! bubblechat - terminal chat client for AI chat services
//!
//! Main entry point for the bubblechat application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bubblechat::cli::{Cli, Commands};
use bubblechat::commands;
use bubblechat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(&cli.config, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { .. } => {
            tracing::info!(
                provider = %config.provider.provider_type,
                model = config.provider.active_model(),
                "Starting interactive chat mode"
            );
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask { prompt, .. } => {
            tracing::info!("Sending single message");
            commands::ask::run_ask(config, prompt).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with bubbles on stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "bubblechat=debug"
    } else {
        "bubblechat=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
