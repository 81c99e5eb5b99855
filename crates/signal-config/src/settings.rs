//! Configuration structures.

use serde::{Deserialize, Serialize};
use signal_analysis::AnalysisConfig;
use signal_core::error::SignalError;
use signal_core::SignalResult;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Validate every section.
    pub fn validate(&self) -> SignalResult<()> {
        self.logging.validate()?;
        self.analysis.validate()
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> SignalResult<String> {
        toml::to_string_pretty(self).map_err(|e| SignalError::Serialization(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "signal-engine".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Console log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Check the level is one `tracing` understands.
    pub fn validate(&self) -> SignalResult<()> {
        if LOG_LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(SignalError::Config(format!(
                "Unknown log level '{}' (expected one of {})",
                self.level,
                LOG_LEVELS.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.app.name, "signal-engine");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".into();
        assert!(matches!(config.validate(), Err(SignalError::Config(_))));
    }

    #[test]
    fn test_invalid_analysis_section() {
        let mut config = AppConfig::default();
        config.analysis.signals.histogram_acceleration = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_sections() {
        let rendered = AppConfig::default().to_toml().unwrap();

        assert!(rendered.contains("[analysis.signals]"));
        assert!(rendered.contains("min_signal_distance = 5"));

        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.analysis, AppConfig::default().analysis);
    }
}
