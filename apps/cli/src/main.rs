use anyhow::Context;
use clap::Parser;
use genius_client::GeniusClient;
use genius_shared_config::CommonConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

/// Filter used when RUST_LOG / LOG_LEVEL cannot be parsed
const DEFAULT_LOG_FILTER: &str = "genius_cli=info,genius_client=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = cli::Cli::parse();
    let config = CommonConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(config = ?config.genius, "Loaded configuration");

    let client = GeniusClient::new(&config.genius).context("Failed to build Genius client")?;
    let output = commands::run(args.command, client, args.json).await?;
    print!("{}", output);

    Ok(())
}
