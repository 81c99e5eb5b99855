//! Moving Average Convergence Divergence (MACD).

use serde::{Deserialize, Serialize};
use signal_core::error::IndicatorError;
use signal_core::traits::Indicator;
use signal_core::types::{BarSeries, IndicatorPoint, IndicatorSeries};

use crate::fold::fold_points;
use crate::moving_average::{Ema, EmaState};

/// MACD periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// Fast EMA period
    pub fast_period: usize,
    /// Slow EMA period
    pub slow_period: usize,
    /// Signal line EMA period
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdParams {
    /// Validate the periods.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.fast_period == 0 || self.slow_period == 0 || self.signal_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD periods must be greater than 0".into(),
            ));
        }
        if self.fast_period >= self.slow_period {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD fast period ({}) must be less than slow period ({})",
                self.fast_period, self.slow_period
            )));
        }
        Ok(())
    }
}

/// Index bookkeeping between the two EMAs, the MACD line and the signal line.
///
/// Every offset is a pure function of the three periods. Bar indices refer
/// to the originating bar series. For bar `b` the slow EMA is read at
/// position `b - slow + 1` (its value for bar `b`) and the fast EMA at
/// position `b - (slow - fast)`, which is the fast value `fast - 1` bars
/// earlier. The MACD point carries the timestamp of bar `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdAlignment {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdAlignment {
    /// Build the alignment for a set of periods.
    pub fn new(params: &MacdParams) -> Self {
        Self {
            fast: params.fast_period,
            slow: params.slow_period,
            signal: params.signal_period,
        }
    }

    /// Bar index of the first MACD line value (the later EMA warm-up).
    pub fn line_start(&self) -> usize {
        self.fast.max(self.slow) - 1
    }

    /// Bar index of the first signal line and histogram value.
    pub fn signal_start(&self) -> usize {
        self.line_start() + self.histogram_offset()
    }

    /// Position within the fast EMA read for the MACD value at bar `bar`.
    pub fn fast_offset(&self, bar: usize) -> Option<usize> {
        bar.checked_sub(self.slow - self.fast)
    }

    /// Position within the slow EMA read for the MACD value at bar `bar`.
    pub fn slow_offset(&self, bar: usize) -> Option<usize> {
        (bar + 1).checked_sub(self.slow)
    }

    /// Offset into the MACD line of the first signal/histogram value.
    pub fn histogram_offset(&self) -> usize {
        self.signal - 1
    }
}

/// MACD output: three series aligned to bar timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub line: IndicatorSeries,
    /// Signal line (EMA of the MACD line)
    pub signal: IndicatorSeries,
    /// Histogram (MACD - signal)
    pub histogram: IndicatorSeries,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    params: MacdParams,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_params(MacdParams::default())
    }

    /// Create a MACD with custom periods.
    ///
    /// # Panics
    /// Panics if any period is zero or `fast >= slow`.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_params(MacdParams {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        })
    }

    /// Create a MACD from a parameter set.
    ///
    /// # Panics
    /// Panics if the parameters do not validate.
    pub fn with_params(params: MacdParams) -> Self {
        assert!(params.fast_period > 0 && params.slow_period > 0 && params.signal_period > 0);
        assert!(
            params.fast_period < params.slow_period,
            "Fast period must be less than slow period"
        );
        Self { params }
    }

    /// Get the periods.
    pub fn params(&self) -> &MacdParams {
        &self.params
    }

    /// Get the alignment bookkeeping for these periods.
    pub fn alignment(&self) -> MacdAlignment {
        MacdAlignment::new(&self.params)
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn calculate(&self, series: &BarSeries) -> MacdOutput {
        let alignment = self.alignment();
        let fast_ema = Ema::new(self.params.fast_period).calculate(series);
        let slow_ema = Ema::new(self.params.slow_period).calculate(series);

        // MACD line: positions fixed by the alignment, stamped with the slow EMA's bar
        let line_points: Vec<IndicatorPoint> = (alignment.line_start()..series.len())
            .filter_map(|bar| {
                let fast = fast_ema.get(alignment.fast_offset(bar)?)?;
                let slow = slow_ema.get(alignment.slow_offset(bar)?)?;
                Some(IndicatorPoint::new(slow.time, fast.value - slow.value))
            })
            .collect();
        let line = IndicatorSeries::new(alignment.line_start(), line_points);

        // Signal line: EMA of the MACD values, seeded with their simple average
        let signal = fold_points(
            EmaState::new(self.params.signal_period),
            alignment.signal_start(),
            line.iter().map(|p| (p.time, p.value)),
        );

        let histogram_points = line
            .points()
            .get(alignment.histogram_offset()..)
            .unwrap_or(&[])
            .iter()
            .zip(signal.iter())
            .map(|(macd, signal)| IndicatorPoint::new(signal.time, macd.value - signal.value))
            .collect();
        let histogram = IndicatorSeries::new(alignment.signal_start(), histogram_points);

        MacdOutput {
            line,
            signal,
            histogram,
        }
    }

    fn warmup_period(&self) -> usize {
        self.alignment().line_start()
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
