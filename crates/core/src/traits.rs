use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::event::MarketSnapshot;

/// Point-in-time benchmark trend/volatility source.
///
/// The tracker calls this once per event creation; a failure degrades to an
/// absent snapshot rather than failing the creation, since market context is
/// advisory, not mandatory, to scoring.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn snapshot(&self, as_of: NaiveDate) -> Result<MarketSnapshot>;
}
