//! Momentum indicators.

use serde::{Deserialize, Serialize};
use signal_core::traits::{Indicator, StreamingIndicator};
use signal_core::types::{BarSeries, IndicatorSeries};

use crate::fold::fold_closes;

/// Relative Strength Index (RSI) with Wilder smoothing.
///
/// Measures the speed and magnitude of recent price changes to evaluate
/// overbought or oversold conditions. Needs `period + 1` bars; the first
/// value is emitted at bar `period`.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    ///
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = IndicatorSeries;

    fn calculate(&self, series: &BarSeries) -> IndicatorSeries {
        fold_closes(RsiState::new(self.period), series, self.warmup_period())
    }

    fn warmup_period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// RSI accumulator.
///
/// The first `period` close-to-close changes are summed to seed the average
/// gain and loss; afterwards each change is folded in with
/// `avg = (avg * (period - 1) + current) / period`. A value at bar `i`
/// therefore depends on the whole smoothed history, not on a raw window.
#[derive(Debug, Clone)]
pub struct RsiState {
    period: usize,
    prev_close: Option<f64>,
    seed_count: usize,
    gain_sum: f64,
    loss_sum: f64,
    averages: Option<(f64, f64)>,
    current: Option<f64>,
}

impl RsiState {
    /// Create a new accumulator.
    ///
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            prev_close: None,
            seed_count: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            averages: None,
            current: None,
        }
    }

    /// Current smoothed `(average gain, average loss)`.
    pub fn averages(&self) -> Option<(f64, f64)> {
        self.averages
    }
}

impl StreamingIndicator for RsiState {
    fn update(&mut self, close: f64) -> Option<f64> {
        let prev = self.prev_close.replace(close)?;
        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        let period = self.period as f64;

        let (avg_gain, avg_loss) = match self.averages {
            Some((avg_gain, avg_loss)) => (
                (avg_gain * (period - 1.0) + gain) / period,
                (avg_loss * (period - 1.0) + loss) / period,
            ),
            None => {
                self.seed_count += 1;
                self.gain_sum += gain;
                self.loss_sum += loss;
                if self.seed_count < self.period {
                    return None;
                }
                (self.gain_sum / period, self.loss_sum / period)
            }
        };

        self.averages = Some((avg_gain, avg_loss));
        self.current = Some(rsi_from_averages(avg_gain, avg_loss));
        self.current
    }

    fn current(&self) -> Option<f64> {
        self.current
    }

    fn reset(&mut self) {
        self.prev_close = None;
        self.seed_count = 0;
        self.gain_sum = 0.0;
        self.loss_sum = 0.0;
        self.averages = None;
        self.current = None;
    }
}

/// Convert smoothed averages into an RSI value in `[0, 100]`.
///
/// Zero average loss saturates the relative strength, so RSI is 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

/// Conventional RSI reading zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    /// Classify an RSI value (>= 70 overbought, <= 30 oversold).
    pub fn classify(rsi: f64) -> Self {
        if rsi >= 70.0 {
            RsiZone::Overbought
        } else if rsi <= 30.0 {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use signal_core::types::Bar;

    fn create_test_series(closes: &[f64]) -> BarSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 60, c, c, c, c))
            .collect();
        BarSeries::new(bars).unwrap()
    }

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Alternating up/down moves
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();
        let series = create_test_series(&closes);

        let result = rsi.calculate(&series);
        assert_eq!(result.len(), 30 - 14);
        assert_eq!(result.start(), 14);
        assert_eq!(result.points()[0].time, series.bars()[14].time);

        for value in result.values() {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_requires_more_than_period_bars() {
        let rsi = Rsi::new(5);
        assert!(rsi.calculate(&create_test_series(&[1.0, 2.0, 3.0, 4.0, 5.0])).is_empty());
        assert_eq!(
            rsi.calculate(&create_test_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).len(),
            1
        );
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&create_test_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]));

        assert_eq!(result.len(), 2);
        for value in result.values() {
            assert!((value - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&create_test_series(&[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]));

        assert_eq!(result.len(), 2);
        for value in result.values() {
            assert!(value.abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_flat_series_saturates() {
        let result = Rsi::new(3).calculate(&create_test_series(&[50.0; 6]));
        assert_eq!(result.values(), vec![100.0, 100.0, 100.0]);
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        // Deltas: +1, -1, +2, then -2 after the seed
        let result = Rsi::new(3).calculate(&create_test_series(&[10.0, 11.0, 10.0, 12.0, 10.0]));

        assert_eq!(result.len(), 2);
        // Seed: avg_gain = 3/3 = 1, avg_loss = 1/3, RS = 3, RSI = 75
        assert!((result.points()[0].value - 75.0).abs() < 1e-10);
        // avg_gain = (1*2 + 0)/3 = 2/3, avg_loss = (1/3*2 + 2)/3 = 8/9, RS = 0.75
        let expected = 100.0 - 100.0 / 1.75;
        assert!((result.points()[1].value - expected).abs() < 1e-10);
    }

    #[test]
    fn test_streaming_rsi_reset() {
        let mut state = RsiState::new(2);
        assert!(state.update(1.0).is_none());
        assert!(state.update(2.0).is_none());
        assert_eq!(state.update(3.0), Some(100.0));
        assert_eq!(state.averages(), Some((1.0, 0.0)));

        state.reset();
        assert!(!state.is_ready());
        assert!(state.averages().is_none());
        assert!(state.update(3.0).is_none());
    }

    #[test]
    fn test_rsi_zone() {
        assert_eq!(RsiZone::classify(85.0), RsiZone::Overbought);
        assert_eq!(RsiZone::classify(70.0), RsiZone::Overbought);
        assert_eq!(RsiZone::classify(50.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(30.0), RsiZone::Oversold);
    }

    proptest! {
        #[test]
        fn rsi_stays_within_bounds(
            closes in proptest::collection::vec(1.0f64..1000.0, 16..120),
            period in 2usize..20,
        ) {
            let series = create_test_series(&closes);
            let result = Rsi::new(period).calculate(&series);

            prop_assert_eq!(result.len(), closes.len().saturating_sub(period));
            for value in result.values() {
                prop_assert!((0.0..=100.0).contains(&value));
            }
        }
    }
}
