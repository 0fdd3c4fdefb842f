mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use scrub_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;
    tracing::debug!(path = %Config::config_path().display(), "config loaded");

    match cli.command {
        cli::Commands::Detect(args) => commands::detect::handle(args, &config).await,
        cli::Commands::Template(cmd) => commands::template::handle(cmd),
        cli::Commands::Redact(args) => commands::redact::handle(args, &config),
    }
}
