// app/src/main.rs

mod cli;
mod config;
mod errors;
mod state;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::state::AppState;

use clap::Parser;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Logs go to stderr so stdout stays machine-readable.
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr)
    .init();

  let config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e.into());
    }
  };

  let state = AppState::build(config).await?;
  tracing::debug!(api = %state.config.api_base_url, "Application state ready.");

  if let Err(e) = cli.execute(&state).await {
    tracing::error!(error = %e, "Command failed.");
    return Err(e.into());
  }
  Ok(())
}
