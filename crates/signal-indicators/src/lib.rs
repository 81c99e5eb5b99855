//! Technical indicators over validated bar series.
//!
//! This crate provides the calculators used by the signal engine:
//! - Moving averages (SMA, EMA)
//! - Momentum (RSI with Wilder smoothing)
//! - Trend convergence (MACD line, signal line and histogram)
//!
//! Every calculator is a pure function of a [`BarSeries`](signal_core::BarSeries)
//! returning a new [`IndicatorSeries`](signal_core::IndicatorSeries) aligned to
//! the bar timestamps. Recursive smoothing is expressed as a left fold over an
//! explicit accumulator (see [`fold`]).

pub mod convergence;
pub mod fold;
pub mod momentum;
pub mod moving_average;

pub use convergence::{Macd, MacdAlignment, MacdOutput, MacdParams};
pub use momentum::{Rsi, RsiState, RsiZone};
pub use moving_average::{Ema, EmaState, Sma};
