use super::fx_model::ExchangeRateSnapshot;
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait defining the contract for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Whether the source page URL is configured
    fn is_configured(&self) -> bool;

    /// Latest snapshot, served from cache while fresh and scraped otherwise
    async fn get_exchange_rates(&self) -> Result<Arc<ExchangeRateSnapshot>>;
}
