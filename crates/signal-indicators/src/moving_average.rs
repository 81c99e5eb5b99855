//! Moving average indicators.

use signal_core::traits::{Indicator, StreamingIndicator};
use signal_core::types::{BarSeries, IndicatorPoint, IndicatorSeries};

use crate::fold::fold_closes;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N closes. The first value is
/// emitted at bar `period - 1`.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    ///
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = IndicatorSeries;

    fn calculate(&self, series: &BarSeries) -> IndicatorSeries {
        let start = self.warmup_period();
        let bars = series.bars();
        if bars.len() < self.period {
            return IndicatorSeries::new(start, vec![]);
        }

        let mut points = Vec::with_capacity(bars.len() - start);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = bars[..self.period].iter().map(|b| b.close).sum();
        points.push(IndicatorPoint::new(bars[start].time, sum / period_f64));

        // Sliding window
        for i in self.period..bars.len() {
            sum = sum - bars[i - self.period].close + bars[i].close;
            points.push(IndicatorPoint::new(bars[i].time, sum / period_f64));
        }

        IndicatorSeries::new(start, points)
    }

    fn warmup_period(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the SMA of the first `period` closes, then smoothed with
/// `k = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    ///
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Ema {
    type Output = IndicatorSeries;

    fn calculate(&self, series: &BarSeries) -> IndicatorSeries {
        fold_closes(EmaState::new(self.period), series, self.warmup_period())
    }

    fn warmup_period(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// EMA accumulator.
///
/// Sums the first `period` values for the seed, then carries one scalar:
/// `ema = value * k + prev * (1 - k)`.
#[derive(Debug, Clone)]
pub struct EmaState {
    period: usize,
    multiplier: f64,
    count: usize,
    sum: f64,
    current: Option<f64>,
}

impl EmaState {
    /// Create a new accumulator.
    ///
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            count: 0,
            sum: 0.0,
            current: None,
        }
    }

    /// Smoothing factor `k`.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl StreamingIndicator for EmaState {
    fn update(&mut self, value: f64) -> Option<f64> {
        self.current = match self.current {
            Some(prev) => Some(value * self.multiplier + prev * (1.0 - self.multiplier)),
            None => {
                self.count += 1;
                self.sum += value;
                (self.count == self.period).then(|| self.sum / self.period as f64)
            }
        };
        self.current
    }

    fn current(&self) -> Option<f64> {
        self.current
    }

    fn reset(&mut self) {
        self.count = 0;
        self.sum = 0.0;
        self.current = None;
    }
}
