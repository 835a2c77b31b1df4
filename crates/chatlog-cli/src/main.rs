mod cli;
mod commands;

use anyhow::Result;
use chatlog_config::Config;
use clap::Parser;

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

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(
        path = %cli.config.clone().unwrap_or_else(Config::config_path).display(),
        "Configuration loaded"
    );

    match cli.command {
        cli::Commands::Archive { ids, output_dir } => {
            commands::archive::handle(&config, ids, output_dir).await
        }
        cli::Commands::Sanitize { source, dest } => {
            commands::sanitize::handle(&config, source, dest)
        }
        cli::Commands::Channels(cmd) => commands::channels::handle(&config, cmd).await,
    }
}
