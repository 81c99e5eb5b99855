//! Analysis runs and reports.

mod engine;
mod report;
mod statistics;

pub use engine::{AnalysisConfig, AnalysisEngine, IndicatorSet};
pub use report::AnalysisReport;
pub use statistics::AnalysisStats;
