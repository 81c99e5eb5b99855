//! Bar source trait definitions.

use crate::error::DataError;
use crate::types::BarSeries;
use async_trait::async_trait;

/// Trait for historical bar sources.
///
/// Sources sit at the ingestion boundary: they drop malformed records,
/// normalize timestamps to seconds, and hand back a validated series.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Load every usable bar, oldest first.
    async fn load(&self) -> Result<BarSeries, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
