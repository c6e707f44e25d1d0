use anyhow::{Context, Result};
use clap::Parser;
use resume_screener::app_log;
use resume_screener::cli::{handle_command, Cli};
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const ENV_LOG_FILE: &str = "SCREENER_LOG_FILE";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    let json_layer = match std::env::var(ENV_LOG_FILE) {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path))?;

            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        Err(_) => None,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli).await {
        app_log!(error, "{:#}", e);
        return Err(e);
    }

    Ok(())
}
