//! Analyze command implementation.

use anyhow::{Context, Result};
use signal_analysis::AnalysisEngine;
use signal_config::AppConfig;
use signal_data::load_series;
use tracing::{info, warn};

use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let mut analysis = config.analysis.clone();
    if let Some(generator) = &args.generator {
        analysis.generator = generator.clone();
    }
    info!(
        data = %args.data.display(),
        generator = %analysis.generator,
        "Starting analysis"
    );

    let engine = AnalysisEngine::new(analysis).context("Invalid analysis configuration")?;

    if !args.data.exists() {
        anyhow::bail!(
            "Data file '{}' does not exist. Provide a CSV or chart JSON file (e.g. --data ./data/bars.csv)",
            args.data.display()
        );
    }
    let series = load_series(&args.data, args.symbol.as_deref())
        .await
        .with_context(|| format!("Failed to load bars from {}", args.data.display()))?;

    if series.is_empty() {
        warn!(data = %args.data.display(), "No usable bars in data file");
    }

    let report = engine.run(&series)?;

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        tokio::fs::write(save_path, report.to_json()?)
            .await
            .with_context(|| format!("Failed to write report to {}", save_path.display()))?;
        info!("Report saved to {:?}", save_path);
    }

    if let Some(csv_path) = &args.markers_csv {
        tokio::fs::write(csv_path, report.markers_to_csv())
            .await
            .with_context(|| format!("Failed to write markers to {}", csv_path.display()))?;
        info!(markers = report.markers.len(), "Markers saved to {:?}", csv_path);
    }

    Ok(())
}
