//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signal-engine")]
#[command(author, version, about = "Technical indicators and confirmed buy/sell markers from OHLC bars")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indicators and markers for a bar file
    Analyze(AnalyzeArgs),
    /// List available marker generators
    Generators,
    /// Validate configuration
    ValidateConfig(ValidateArgs),
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Bar file (CSV, or chart JSON with a `.json` extension)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Symbol label for the report
    #[arg(short = 'S', long)]
    pub symbol: Option<String>,

    /// Marker generator (overrides the config file)
    #[arg(short, long)]
    pub generator: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write markers as CSV to a file
    #[arg(long)]
    pub markers_csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Print the built-in defaults as TOML instead of validating
    #[arg(long)]
    pub print_defaults: bool,
}
