//! Error types for the signal engine.

use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Violations of the bar series invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Bar {index} (time {time}) has a non-finite price")]
    NonFinitePrice { index: usize, time: i64 },

    #[error("Bar {index} has timestamp {current}, which does not follow {previous}")]
    NonMonotonicTime {
        index: usize,
        previous: i64,
        current: i64,
    },
}

/// Indicator parameter errors.
///
/// Short input is not an error: calculators return an empty series instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Marker generator errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Generator not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid bar series: {0}")]
    Series(#[from] SeriesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type SignalResult<T> = Result<T, SignalError>;
