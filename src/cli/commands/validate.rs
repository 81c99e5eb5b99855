//! Validate configuration command.

use anyhow::Result;
use signal_config::{load_config, AppConfig};
use std::path::Path;

use crate::cli::ValidateArgs;

pub async fn run(args: ValidateArgs, config_path: &Path) -> Result<()> {
    if args.print_defaults {
        print!("{}", AppConfig::default().to_toml()?);
        return Ok(());
    }

    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let analysis = &config.analysis;
    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Generator: {}", analysis.generator);
    println!(
        "Periods: SMA {} / EMA {} / RSI {}",
        analysis.sma_period, analysis.ema_period, analysis.rsi_period
    );
    println!(
        "MACD: {}/{}/{}",
        analysis.macd.fast_period, analysis.macd.slow_period, analysis.macd.signal_period
    );
    println!(
        "Confirmed signals: EMA {}/{}, RSI band ({}, {}), min distance {} bars",
        analysis.signals.fast_ema_period,
        analysis.signals.slow_ema_period,
        analysis.signals.rsi_lower,
        analysis.signals.rsi_upper,
        analysis.signals.min_signal_distance
    );

    Ok(())
}
