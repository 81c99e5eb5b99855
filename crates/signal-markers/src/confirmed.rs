//! Confirmed crossover signal generator.
//!
//! A BUY needs three things on the same bar: the fast EMA crossing above the
//! slow EMA, RSI strictly inside the neutral band, and the MACD histogram
//! turning positive (or accelerating while already positive). SELL mirrors
//! every condition. Consecutive markers are kept a minimum number of bars
//! apart.

use serde::{Deserialize, Serialize};
use signal_core::error::GeneratorError;
use signal_core::traits::{GeneratorConfig, Indicator, MarkerGenerator};
use signal_core::types::{BarSeries, Direction, Marker, TimeIndex};
use signal_indicators::{Ema, Macd, MacdParams, Rsi};
use tracing::debug;

/// Configuration for the confirmed crossover generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Fast EMA period
    pub fast_ema_period: usize,
    /// Slow EMA period
    pub slow_ema_period: usize,
    /// RSI period
    pub rsi_period: usize,
    /// MACD periods
    pub macd: MacdParams,
    /// Bars required before any marker; also the first bar scanned
    pub min_bars: usize,
    /// Minimum bar distance between consecutive markers
    pub min_signal_distance: usize,
    /// RSI must be strictly above this bound
    pub rsi_lower: f64,
    /// RSI must be strictly below this bound
    pub rsi_upper: f64,
    /// Histogram growth over the previous bar that counts as acceleration (0.2 = 20%)
    pub histogram_acceleration: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            fast_ema_period: 20,
            slow_ema_period: 50,
            rsi_period: 14,
            macd: MacdParams::default(),
            min_bars: 50,
            min_signal_distance: 5,
            rsi_lower: 40.0,
            rsi_upper: 60.0,
            histogram_acceleration: 0.2,
        }
    }
}

impl GeneratorConfig for SignalConfig {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.fast_ema_period == 0 || self.slow_ema_period == 0 || self.rsi_period == 0 {
            return Err(GeneratorError::InvalidConfig(
                "Indicator periods must be greater than 0".into(),
            ));
        }
        if self.fast_ema_period >= self.slow_ema_period {
            return Err(GeneratorError::InvalidConfig(
                "Fast EMA period must be less than slow EMA period".into(),
            ));
        }
        self.macd.validate()?;
        if self.min_bars == 0 {
            return Err(GeneratorError::InvalidConfig(
                "Minimum bar count must be greater than 0".into(),
            ));
        }
        if !(self.rsi_lower < self.rsi_upper) {
            return Err(GeneratorError::InvalidConfig(format!(
                "RSI band ({}, {}) is empty",
                self.rsi_lower, self.rsi_upper
            )));
        }
        if !self.histogram_acceleration.is_finite() || self.histogram_acceleration < 0.0 {
            return Err(GeneratorError::InvalidConfig(
                "Histogram acceleration must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Indicator values at one bar; `None` while that indicator is warming up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reading {
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub histogram: Option<f64>,
}

/// Timestamp lookups for every indicator the generator reads.
struct IndicatorFrame {
    ema_fast: TimeIndex,
    ema_slow: TimeIndex,
    rsi: TimeIndex,
    histogram: TimeIndex,
}

impl IndicatorFrame {
    fn compute(config: &SignalConfig, series: &BarSeries) -> Self {
        let macd = Macd::with_params(config.macd).calculate(series);
        Self {
            ema_fast: Ema::new(config.fast_ema_period).calculate(series).time_index(),
            ema_slow: Ema::new(config.slow_ema_period).calculate(series).time_index(),
            rsi: Rsi::new(config.rsi_period).calculate(series).time_index(),
            histogram: macd.histogram.time_index(),
        }
    }

    fn reading(&self, time: i64) -> Reading {
        Reading {
            ema_fast: self.ema_fast.get(time),
            ema_slow: self.ema_slow.get(time),
            rsi: self.rsi.get(time),
            histogram: self.histogram.get(time),
        }
    }
}

/// Confirmed crossover signal generator.
pub struct SignalGenerator {
    config: SignalConfig,
}

impl SignalGenerator {
    /// Create a new generator, rejecting a configuration that does not validate.
    pub fn new(config: SignalConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Decide a direction from the previous and current bar readings.
    ///
    /// BUY is checked first; SELL only when BUY does not fire. Any missing
    /// value means no marker.
    pub fn evaluate(&self, prev: &Reading, now: &Reading) -> Option<Direction> {
        let (
            Some(fast_prev),
            Some(slow_prev),
            Some(fast),
            Some(slow),
            Some(rsi),
            Some(hist_prev),
            Some(hist),
        ) = (
            prev.ema_fast,
            prev.ema_slow,
            now.ema_fast,
            now.ema_slow,
            now.rsi,
            prev.histogram,
            now.histogram,
        )
        else {
            return None;
        };

        if !(rsi > self.config.rsi_lower && rsi < self.config.rsi_upper) {
            return None;
        }

        let factor = 1.0 + self.config.histogram_acceleration;

        let golden_cross = fast_prev <= slow_prev && fast > slow;
        let bullish_momentum =
            hist > 0.0 && (hist_prev < 0.0 || (hist_prev > 0.0 && hist > hist_prev * factor));
        if golden_cross && bullish_momentum {
            return Some(Direction::Buy);
        }

        let death_cross = fast_prev >= slow_prev && fast < slow;
        let bearish_momentum =
            hist < 0.0 && (hist_prev > 0.0 || (hist_prev < 0.0 && hist < hist_prev * factor));
        (death_cross && bearish_momentum).then_some(Direction::Sell)
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self {
            config: SignalConfig::default(),
        }
    }
}

impl MarkerGenerator for SignalGenerator {
    fn name(&self) -> &str {
        "Confirmed Crossover"
    }

    fn description(&self) -> &str {
        "EMA crossover confirmed by an RSI neutral band and MACD histogram momentum"
    }

    fn generate(&self, series: &BarSeries) -> Vec<Marker> {
        if !self.is_warmed_up(series.len()) {
            debug!(
                bars = series.len(),
                required = self.warmup_period(),
                "Not enough bars for confirmed signals"
            );
            return Vec::new();
        }

        let frame = IndicatorFrame::compute(&self.config, series);
        let bars = series.bars();

        let markers: Vec<Marker> = spaced_scan(
            self.config.min_bars.max(1),
            bars.len(),
            self.config.min_signal_distance,
            |i| {
                let prev = frame.reading(bars[i - 1].time);
                let now = frame.reading(bars[i].time);
                self.evaluate(&prev, &now)
            },
        )
        .into_iter()
        .map(|(i, direction)| Marker::new(bars[i].time, i, direction))
        .collect();

        debug!(
            bars = bars.len(),
            markers = markers.len(),
            "Confirmed signal scan complete"
        );
        markers
    }

    fn warmup_period(&self) -> usize {
        self.config.min_bars
    }
}

/// Walk `start..len`, skipping indices closer than `min_distance` to the last emitted one.
fn spaced_scan(
    start: usize,
    len: usize,
    min_distance: usize,
    mut decide: impl FnMut(usize) -> Option<Direction>,
) -> Vec<(usize, Direction)> {
    let mut last: Option<usize> = None;
    let mut emitted = Vec::new();

    for index in start..len {
        if last.is_some_and(|last| index - last < min_distance) {
            continue;
        }
        if let Some(direction) = decide(index) {
            emitted.push((index, direction));
            last = Some(index);
        }
    }

    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use signal_core::types::{Bar, MarkerPosition};
    use std::f64::consts::PI;

    fn create_test_series(closes: &[f64]) -> BarSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(1_700_000_000 + i as i64 * 3600, c, c + 1.0, c - 1.0, c))
            .collect();
        BarSeries::new(bars).unwrap()
    }

    /// Slow cycle with a fast ripple on top.
    fn two_cycle_closes(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let t = i as f64;
                100.0 + 5.0 * (2.0 * PI * t / 120.0).sin() + (2.0 * PI * t / 7.0).sin()
            })
            .collect()
    }

    fn reading(fast: f64, slow: f64, rsi: f64, histogram: f64) -> Reading {
        Reading {
            ema_fast: Some(fast),
            ema_slow: Some(slow),
            rsi: Some(rsi),
            histogram: Some(histogram),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = SignalConfig::default();
        assert!(config.validate().is_ok());

        config.fast_ema_period = 60;
        assert!(config.validate().is_err());

        let config = SignalConfig {
            rsi_lower: 60.0,
            rsi_upper: 40.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SignalConfig {
            histogram_acceleration: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SignalConfig {
            macd: MacdParams {
                fast_period: 30,
                slow_period: 26,
                signal_period: 9,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::Indicator(_))
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let zero_period = SignalConfig {
            fast_ema_period: 0,
            ..Default::default()
        };
        assert!(matches!(
            SignalGenerator::new(zero_period),
            Err(GeneratorError::InvalidConfig(_))
        ));

        let inverted_macd = SignalConfig {
            macd: MacdParams {
                fast_period: 26,
                slow_period: 12,
                signal_period: 9,
            },
            ..Default::default()
        };
        assert!(SignalGenerator::new(inverted_macd).is_err());

        let generator = SignalGenerator::new(SignalConfig::default()).unwrap();
        assert_eq!(generator.config(), &SignalConfig::default());
    }

    #[test]
    fn test_buy_on_golden_cross_with_histogram_flip() {
        let generator = SignalGenerator::default();
        let prev = reading(99.0, 100.0, 48.0, -0.2);
        let now = reading(100.5, 100.0, 52.0, 0.1);

        assert_eq!(generator.evaluate(&prev, &now), Some(Direction::Buy));
    }

    #[test]
    fn test_buy_on_histogram_acceleration() {
        let generator = SignalGenerator::default();
        // Touching averages on the previous bar still count as a cross
        let prev = reading(100.0, 100.0, 50.0, 1.0);

        assert_eq!(
            generator.evaluate(&prev, &reading(100.2, 100.0, 50.0, 1.3)),
            Some(Direction::Buy)
        );
        // 10% growth is below the 20% threshold
        assert_eq!(generator.evaluate(&prev, &reading(100.2, 100.0, 50.0, 1.1)), None);
    }

    #[test]
    fn test_rsi_outside_neutral_band_blocks_signal() {
        let generator = SignalGenerator::default();
        let prev = reading(99.0, 100.0, 50.0, -0.2);

        for rsi in [40.0, 60.0, 75.0, 100.0, 12.0] {
            assert_eq!(generator.evaluate(&prev, &reading(100.5, 100.0, rsi, 0.1)), None);
        }
    }

    #[test]
    fn test_sell_mirrors_buy() {
        let generator = SignalGenerator::default();

        let prev = reading(101.0, 100.0, 50.0, 0.3);
        let now = reading(99.5, 100.0, 45.0, -0.1);
        assert_eq!(generator.evaluate(&prev, &now), Some(Direction::Sell));

        let prev = reading(100.0, 100.0, 50.0, -1.0);
        assert_eq!(
            generator.evaluate(&prev, &reading(99.0, 100.0, 45.0, -1.25)),
            Some(Direction::Sell)
        );
        assert_eq!(generator.evaluate(&prev, &reading(99.0, 100.0, 45.0, -1.1)), None);
    }

    #[test]
    fn test_cross_without_momentum_is_ignored() {
        let generator = SignalGenerator::default();
        let prev = reading(99.0, 100.0, 50.0, 0.5);
        // Histogram shrinking while positive
        assert_eq!(generator.evaluate(&prev, &reading(100.5, 100.0, 50.0, 0.4)), None);
        // Momentum without a cross
        let prev = reading(101.0, 100.0, 50.0, -0.5);
        assert_eq!(generator.evaluate(&prev, &reading(101.5, 100.0, 50.0, 0.5)), None);
    }

    #[test]
    fn test_missing_values_never_fire() {
        let generator = SignalGenerator::default();
        let prev = reading(99.0, 100.0, 50.0, -0.2);
        let now = reading(100.5, 100.0, 52.0, 0.1);

        let warming_prev = Reading {
            histogram: None,
            ..prev
        };
        assert_eq!(generator.evaluate(&warming_prev, &now), None);

        let warming_now = Reading {
            ema_slow: None,
            ..now
        };
        assert_eq!(generator.evaluate(&prev, &warming_now), None);
        assert_eq!(generator.evaluate(&Reading::default(), &Reading::default()), None);
    }

    #[test]
    fn test_spaced_scan_enforces_distance() {
        let emitted = spaced_scan(50, 70, 5, |_| Some(Direction::Buy));
        let indices: Vec<usize> = emitted.iter().map(|(i, _)| *i).collect();

        assert_eq!(indices, vec![50, 55, 60, 65]);
    }

    #[test]
    fn test_spaced_scan_only_counts_emitted_bars() {
        // Only odd indices qualify; spacing restarts from the last emitted index
        let emitted = spaced_scan(0, 20, 4, |i| (i % 2 == 1).then_some(Direction::Sell));
        let indices: Vec<usize> = emitted.iter().map(|(i, _)| *i).collect();

        assert_eq!(indices, vec![1, 5, 9, 13, 17]);
    }

    #[test]
    fn test_spaced_scan_without_distance() {
        let emitted = spaced_scan(3, 6, 0, |_| Some(Direction::Buy));
        assert_eq!(emitted.len(), 3);
    }

    #[test]
    fn test_short_series_yields_no_markers() {
        let generator = SignalGenerator::default();
        let series = create_test_series(&two_cycle_closes(49));

        assert!(generator.generate(&series).is_empty());
    }

    #[test]
    fn test_rising_line_does_not_fire() {
        // 60 bars rising one unit per bar: RSI is pinned at 100, outside the band
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = create_test_series(&closes);
        let generator = SignalGenerator::default();

        assert!(generator.generate(&series).is_empty());

        let rsi = Rsi::new(14).calculate(&series);
        assert!(rsi.iter().all(|p| (p.value - 100.0).abs() < 1e-10));
    }

    #[test]
    fn test_two_cycle_series_markers() {
        let series = create_test_series(&two_cycle_closes(200));
        let markers = SignalGenerator::default().generate(&series);

        let summary: Vec<(usize, Direction)> =
            markers.iter().map(|m| (m.index, m.direction)).collect();
        assert_eq!(summary, vec![(117, Direction::Buy), (177, Direction::Sell)]);

        for marker in &markers {
            assert_eq!(marker.time, series.bars()[marker.index].time);
        }
        assert_eq!(markers[0].position, MarkerPosition::BelowBar);
        assert_eq!(markers[1].position, MarkerPosition::AboveBar);
    }

    proptest! {
        #[test]
        fn markers_are_spaced_and_exclusive(
            steps in proptest::collection::vec(-2.0f64..2.0, 50..220),
        ) {
            let closes: Vec<f64> = steps
                .iter()
                .scan(100.0, |price, step| {
                    *price += step;
                    Some(*price)
                })
                .collect();
            let series = create_test_series(&closes);
            let markers = SignalGenerator::default().generate(&series);

            for marker in &markers {
                prop_assert!(marker.index >= 50);
                prop_assert_eq!(marker.time, series.bars()[marker.index].time);
            }
            for pair in markers.windows(2) {
                prop_assert!(pair[1].index - pair[0].index >= 5);
            }
        }
    }
}
