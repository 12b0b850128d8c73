//! Exchange rate provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::RateTable;

/// Trait for sources of the published exchange rate table.
///
/// One call is one complete attempt: implementations must not retry
/// internally and must release any external resource (browser process,
/// connection) before returning, whether the attempt succeeded or not.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use nbc_fx_market_data::{ExchangeRateProvider, MarketDataError, RateTable};
///
/// struct StaticProvider(RateTable);
///
/// #[async_trait]
/// impl ExchangeRateProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn fetch_rate_table(&self, _url: &str) -> Result<RateTable, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch and parse the rate table published at `url`.
    async fn fetch_rate_table(&self, url: &str) -> Result<RateTable, MarketDataError>;
}
