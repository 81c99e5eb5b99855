//! Analysis engine: one pass of every indicator plus the selected marker generator.

use serde::{Deserialize, Serialize};
use signal_core::error::{GeneratorError, SignalError};
use signal_core::traits::{GeneratorConfig, Indicator};
use signal_core::types::{BarSeries, IndicatorSeries};
use signal_core::SignalResult;
use signal_indicators::{Ema, Macd, MacdOutput, MacdParams, Rsi, Sma};
use signal_markers::{CrossoverConfig, GeneratorRegistry, SignalConfig};
use std::time::Instant;
use tracing::{debug, info};

use crate::report::AnalysisReport;
use crate::statistics::AnalysisStats;

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// SMA period
    pub sma_period: usize,
    /// EMA period
    pub ema_period: usize,
    /// RSI period
    pub rsi_period: usize,
    /// MACD periods
    pub macd: MacdParams,
    /// Registry key of the marker generator
    pub generator: String,
    /// Settings for the `confirmed` generator
    pub signals: SignalConfig,
    /// Settings for the `crossover` generator
    pub crossover: CrossoverConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_period: 14,
            ema_period: 14,
            rsi_period: 14,
            macd: MacdParams::default(),
            generator: "confirmed".to_string(),
            signals: SignalConfig::default(),
            crossover: CrossoverConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate every period and threshold.
    pub fn validate(&self) -> SignalResult<()> {
        if self.sma_period == 0 || self.ema_period == 0 || self.rsi_period == 0 {
            return Err(SignalError::Config(
                "Indicator periods must be greater than 0".into(),
            ));
        }
        self.macd.validate()?;
        self.signals.validate()?;
        self.crossover.validate()?;
        self.generator_config().map(|_| ())
    }

    /// JSON configuration for the selected generator.
    fn generator_config(&self) -> SignalResult<serde_json::Value> {
        let value = match self.generator.as_str() {
            "confirmed" => serde_json::to_value(&self.signals),
            "crossover" => serde_json::to_value(&self.crossover),
            other => return Err(GeneratorError::NotFound(other.to_string()).into()),
        };
        value.map_err(|e| SignalError::Serialization(e.to_string()))
    }
}

/// Every indicator series computed for a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorSet {
    pub sma: IndicatorSeries,
    pub ema: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub macd: MacdOutput,
}

/// Runs the configured indicators and generator over a bar series.
pub struct AnalysisEngine {
    config: AnalysisConfig,
    registry: GeneratorRegistry,
}

impl AnalysisEngine {
    /// Create a new engine, rejecting invalid configuration up front.
    pub fn new(config: AnalysisConfig) -> SignalResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: GeneratorRegistry::new(),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute all indicators for a series.
    pub fn indicators(&self, series: &BarSeries) -> IndicatorSet {
        IndicatorSet {
            sma: Sma::new(self.config.sma_period).calculate(series),
            ema: Ema::new(self.config.ema_period).calculate(series),
            rsi: Rsi::new(self.config.rsi_period).calculate(series),
            macd: Macd::with_params(self.config.macd).calculate(series),
        }
    }

    /// Run the analysis.
    pub fn run(&self, series: &BarSeries) -> SignalResult<AnalysisReport> {
        let started = Instant::now();
        let generator = self
            .registry
            .create(&self.config.generator, self.config.generator_config()?)?;

        let indicators = self.indicators(series);
        debug!(
            sma = indicators.sma.len(),
            ema = indicators.ema.len(),
            rsi = indicators.rsi.len(),
            macd = indicators.macd.histogram.len(),
            "Indicators calculated"
        );

        let markers = generator.generate(series);
        let stats = AnalysisStats::compute(series, &indicators, &markers);

        info!(
            symbol = series.symbol().unwrap_or("-"),
            bars = series.len(),
            generator = generator.name(),
            buys = stats.buy_signals,
            sells = stats.sell_signals,
            elapsed = ?started.elapsed(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            symbol: series.symbol().map(str::to_string),
            generator: generator.name().to_string(),
            config: self.config.clone(),
            stats,
            indicators,
            markers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::types::{Bar, Direction};
    use std::f64::consts::PI;

    fn two_cycle_series(len: usize) -> BarSeries {
        let bars = (0..len)
            .map(|i| {
                let t = i as f64;
                let c = 100.0 + 5.0 * (2.0 * PI * t / 120.0).sin() + (2.0 * PI * t / 7.0).sin();
                Bar::new(1_700_000_000 + i as i64 * 3600, c, c + 0.5, c - 0.5, c)
            })
            .collect();
        BarSeries::new(bars).unwrap().with_symbol("WAVE")
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            sma_period: 0,
            ..Default::default()
        };
        assert!(matches!(
            AnalysisEngine::new(config),
            Err(SignalError::Config(_))
        ));

        let config = AnalysisConfig {
            generator: "fibonacci".into(),
            ..Default::default()
        };
        assert!(matches!(
            AnalysisEngine::new(config),
            Err(SignalError::Generator(GeneratorError::NotFound(_)))
        ));

        let mut config = AnalysisConfig::default();
        config.signals.rsi_upper = 30.0;
        assert!(matches!(
            AnalysisEngine::new(config),
            Err(SignalError::Generator(GeneratorError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_run_confirmed_generator() {
        let series = two_cycle_series(200);
        let engine = AnalysisEngine::new(AnalysisConfig::default()).unwrap();
        let report = engine.run(&series).unwrap();

        assert_eq!(report.symbol.as_deref(), Some("WAVE"));
        assert_eq!(report.generator, "Confirmed Crossover");
        assert_eq!(report.markers.len(), 2);
        assert_eq!(report.markers[0].direction, Direction::Buy);
        assert_eq!(report.markers[0].index, 117);
        assert_eq!(report.markers[1].direction, Direction::Sell);
        assert_eq!(report.stats.buy_signals, 1);
        assert_eq!(report.stats.sell_signals, 1);

        assert_eq!(report.indicators.sma.len(), 200 - 13);
        assert_eq!(report.indicators.rsi.len(), 200 - 14);
        assert_eq!(report.indicators.macd.histogram.len(), 200 - 33);
    }

    #[test]
    fn test_run_crossover_generator() {
        let series = two_cycle_series(200);
        let config = AnalysisConfig {
            generator: "crossover".into(),
            ..Default::default()
        };
        let report = AnalysisEngine::new(config).unwrap().run(&series).unwrap();

        assert_eq!(report.generator, "EMA Crossover");
        assert_eq!(report.markers.len(), 9);
        assert_eq!(report.stats.buy_signals, 4);
        assert_eq!(report.stats.sell_signals, 5);
    }

    #[test]
    fn test_run_empty_series() {
        let engine = AnalysisEngine::new(AnalysisConfig::default()).unwrap();
        let report = engine.run(&BarSeries::default()).unwrap();

        assert!(report.markers.is_empty());
        assert!(report.indicators.sma.is_empty());
        assert_eq!(report.stats.bars, 0);
        assert!(report.stats.last_close.is_none());
    }
}
