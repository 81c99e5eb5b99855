//! Signal engine CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use signal_config::{load_config, load_from_env, AppConfig, LogFormat};
use signal_monitor::setup_logging;
use std::path::Path;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let config = resolve_config(&cli.config, config_found)?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json_logs = cli.json_logs || config.logging.format == LogFormat::Json;
    let _log_guard = setup_logging(
        &log_level,
        json_logs,
        config.logging.file.as_deref().map(Path::new),
    );

    if !config_found {
        debug!(path = ?cli.config, "Config file not found, using defaults");
    }

    // Execute command
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Generators => cli::commands::generators::run().await,
        Commands::ValidateConfig(args) => cli::commands::validate::run(args, &cli.config).await,
    }
}

/// Load the config file, or defaults plus environment overrides when it is absent.
fn resolve_config(path: &Path, exists: bool) -> Result<AppConfig> {
    if exists {
        load_config(path).with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        load_from_env().context("Failed to load configuration from environment")
    }
}
