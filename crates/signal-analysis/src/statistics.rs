//! Summary statistics for an analysis run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signal_core::types::{BarSeries, Direction, IndicatorSeries, Marker};
use signal_indicators::RsiZone;

use crate::engine::IndicatorSet;

/// Analysis statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Number of bars analysed
    pub bars: usize,
    /// Timestamp of the first bar (seconds)
    pub first_time: Option<i64>,
    /// Timestamp of the last bar (seconds)
    pub last_time: Option<i64>,
    /// Last close
    pub last_close: Option<f64>,
    /// Change from first to last close, in percent
    pub change_pct: Option<f64>,
    /// Latest SMA
    pub sma: Option<f64>,
    /// Latest EMA
    pub ema: Option<f64>,
    /// Latest RSI
    pub rsi: Option<f64>,
    /// Zone of the latest RSI
    pub rsi_zone: Option<RsiZone>,
    /// Latest MACD line
    pub macd: Option<f64>,
    /// Latest MACD signal line
    pub macd_signal: Option<f64>,
    /// Latest MACD histogram
    pub macd_histogram: Option<f64>,
    /// Number of BUY markers
    pub buy_signals: usize,
    /// Number of SELL markers
    pub sell_signals: usize,
    /// Most recent marker
    pub last_marker: Option<Marker>,
}

impl AnalysisStats {
    /// Compute statistics from a finished run.
    pub fn compute(series: &BarSeries, indicators: &IndicatorSet, markers: &[Marker]) -> Self {
        let latest = |s: &IndicatorSeries| s.last().map(|p| p.value);

        let first_close = series.first().map(|b| b.close);
        let last_close = series.last().map(|b| b.close);
        let change_pct = match (first_close, last_close) {
            (Some(first), Some(last)) if first != 0.0 => Some((last - first) / first * 100.0),
            _ => None,
        };

        let rsi = latest(&indicators.rsi);

        Self {
            bars: series.len(),
            first_time: series.first().map(|b| b.time),
            last_time: series.last().map(|b| b.time),
            last_close,
            change_pct,
            sma: latest(&indicators.sma),
            ema: latest(&indicators.ema),
            rsi,
            rsi_zone: rsi.map(RsiZone::classify),
            macd: latest(&indicators.macd.line),
            macd_signal: latest(&indicators.macd.signal),
            macd_histogram: latest(&indicators.macd.histogram),
            buy_signals: count(markers, Direction::Buy),
            sell_signals: count(markers, Direction::Sell),
            last_marker: markers.last().copied(),
        }
    }

    /// First and last bar times as dates.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = DateTime::from_timestamp(self.first_time?, 0)?;
        let last = DateTime::from_timestamp(self.last_time?, 0)?;
        Some((first, last))
    }

    /// Total number of markers.
    pub fn total_signals(&self) -> usize {
        self.buy_signals + self.sell_signals
    }
}

fn count(markers: &[Marker], direction: Direction) -> usize {
    markers.iter().filter(|m| m.direction == direction).count()
}
