//! Plain EMA crossover generator.

use serde::{Deserialize, Serialize};
use signal_core::error::GeneratorError;
use signal_core::traits::{GeneratorConfig, Indicator, MarkerGenerator};
use signal_core::types::{BarSeries, Direction, Marker};
use signal_indicators::Ema;
use tracing::debug;

/// Configuration for the crossover generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            fast_period: 3,
            slow_period: 30,
        }
    }
}

impl GeneratorConfig for CrossoverConfig {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.fast_period == 0 || self.slow_period == 0 {
            return Err(GeneratorError::InvalidConfig(
                "EMA periods must be greater than 0".into(),
            ));
        }
        if self.fast_period >= self.slow_period {
            return Err(GeneratorError::InvalidConfig(
                "Fast period must be less than slow period".into(),
            ));
        }
        Ok(())
    }
}

/// Marks every bar where the fast EMA strictly crosses the slow EMA.
///
/// No momentum filter and no spacing: touching averages do not count as a
/// cross, so a marker needs the fast EMA strictly on the other side on both
/// bars.
pub struct CrossoverGenerator {
    config: CrossoverConfig,
}

impl CrossoverGenerator {
    /// Create a new generator, rejecting a configuration that does not validate.
    pub fn new(config: CrossoverConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CrossoverConfig {
        &self.config
    }
}

impl Default for CrossoverGenerator {
    fn default() -> Self {
        Self {
            config: CrossoverConfig::default(),
        }
    }
}

impl MarkerGenerator for CrossoverGenerator {
    fn name(&self) -> &str {
        "EMA Crossover"
    }

    fn description(&self) -> &str {
        "Fast/slow EMA crossover without confirmation filters"
    }

    fn generate(&self, series: &BarSeries) -> Vec<Marker> {
        if !self.is_warmed_up(series.len()) {
            debug!(
                bars = series.len(),
                required = self.warmup_period(),
                "Not enough bars for crossover signals"
            );
            return Vec::new();
        }

        let fast = Ema::new(self.config.fast_period)
            .calculate(series)
            .time_index();
        let slow = Ema::new(self.config.slow_period).calculate(series);

        let markers: Vec<Marker> = slow
            .points()
            .windows(2)
            .enumerate()
            .filter_map(|(k, pair)| {
                let (prev, now) = (pair[0], pair[1]);
                let fast_prev = fast.get(prev.time)?;
                let fast_now = fast.get(now.time)?;

                let direction = if fast_prev < prev.value && fast_now > now.value {
                    Direction::Buy
                } else if fast_prev > prev.value && fast_now < now.value {
                    Direction::Sell
                } else {
                    return None;
                };
                Some(Marker::new(now.time, slow.start() + k + 1, direction))
            })
            .collect();

        debug!(
            bars = series.len(),
            markers = markers.len(),
            "Crossover scan complete"
        );
        markers
    }

    fn warmup_period(&self) -> usize {
        self.config.slow_period + 1
    }
}
