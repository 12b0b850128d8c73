use super::fx_errors::FxError;
use super::fx_model::ExchangeRateSnapshot;
use super::fx_traits::FxServiceTrait;
use crate::cache::SnapshotCache;
use crate::constants::{EXCHANGE_RATES_CACHE_KEY, SOURCE_URL_ENV_VAR};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use nbc_fx_market_data::{ExchangeRateProvider, MarketDataError};
use std::sync::Arc;

/// Serves the exchange rate snapshot, scraping the source page on cache miss.
///
/// Request flow: validate configuration, check the cache, and on a miss fetch
/// through the provider, build a snapshot and cache it. A failed fetch is
/// returned as an error and leaves the cache untouched.
#[derive(Clone)]
pub struct FxService {
    provider: Arc<dyn ExchangeRateProvider>,
    cache: SnapshotCache,
    source_url: Option<String>,
}

impl FxService {
    /// Creates the service. A blank `source_url` counts as not configured.
    pub fn new(
        provider: Arc<dyn ExchangeRateProvider>,
        cache: SnapshotCache,
        source_url: Option<String>,
    ) -> Self {
        let source_url = source_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        Self {
            provider,
            cache,
            source_url,
        }
    }

    async fn fetch_snapshot(
        &self,
        url: &str,
    ) -> std::result::Result<Arc<ExchangeRateSnapshot>, MarketDataError> {
        log::info!("Fetching exchange rates from {}", self.provider.id());
        let table = self.provider.fetch_rate_table(url).await.map_err(|e| {
            log::error!("{} fetch failed: {}", self.provider.id(), e);
            e
        })?;

        let snapshot = ExchangeRateSnapshot::new(Utc::now(), table.into_rates());
        log::info!(
            "Fetched {} exchange rates from {}",
            snapshot.rates().len(),
            self.provider.id()
        );
        Ok(Arc::new(snapshot))
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    fn is_configured(&self) -> bool {
        self.source_url.is_some()
    }

    async fn get_exchange_rates(&self) -> Result<Arc<ExchangeRateSnapshot>> {
        let url = self
            .source_url
            .as_deref()
            .ok_or_else(|| Error::MissingConfigKey(SOURCE_URL_ENV_VAR.to_string()))?;

        if let Some(snapshot) = self.cache.get(EXCHANGE_RATES_CACHE_KEY).await {
            log::debug!("Serving exchange rates cached at {}", snapshot.date());
            return Ok(snapshot);
        }

        self.cache
            .get_or_try_fetch(EXCHANGE_RATES_CACHE_KEY, self.fetch_snapshot(url))
            .await
            .map_err(|e| FxError::FetchError(e.to_string()).into())
    }
}
