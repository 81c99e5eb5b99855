//! OHLC bar types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// A single OHLC price bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in seconds
    pub time: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// Check that all four prices are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// Validated, time-ordered sequence of bars.
///
/// Insertion order is chronological order and timestamps strictly increase.
/// A series never changes after construction; transforms build new values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarSeries {
    /// Optional symbol label, used only for reporting
    symbol: Option<String>,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series from bars that are already in chronological order.
    ///
    /// The bars are not sorted. A non-finite price or a timestamp that does not
    /// strictly increase is rejected with the offending index.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.is_finite() {
                return Err(SeriesError::NonFinitePrice {
                    index,
                    time: bar.time,
                });
            }
        }

        for (offset, pair) in bars.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(SeriesError::NonMonotonicTime {
                    index: offset + 1,
                    previous: pair[0].time,
                    current: pair[1].time,
                });
            }
        }

        Ok(Self { symbol: None, bars })
    }

    /// Attach a symbol label.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Symbol label, if one was attached.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Get the first bar.
    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
