#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use nbc_fx_market_data::{ExchangeRateProvider, ExchangeRateRow, MarketDataError, RateTable};
use nbc_fx_server::{api::app_router, build_state_with_provider, config::Config, AppState};
use rust_decimal_macros::dec;

/// Provider standing in for the browser; counts calls and can fail on demand
pub struct FakeProvider {
    calls: AtomicUsize,
    fail: bool,
    delay: Duration,
}

impl FakeProvider {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
            delay: Duration::ZERO,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
            delay: Duration::ZERO,
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
            delay,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeRateProvider for FakeProvider {
    fn id(&self) -> &'static str {
        "FAKE"
    }

    async fn fetch_rate_table(&self, _url: &str) -> Result<RateTable, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(MarketDataError::TableTimeout {
                selector: ".tbl-responsive".to_string(),
                timeout_ms: 30_000,
            });
        }
        Ok(RateTable {
            rows: vec![ExchangeRateRow {
                currency: "Thai Baht".to_string(),
                symbol: "KHR/THB".to_string(),
                unit: 1,
                bid: dec!(112.5),
                ask: dec!(113.6),
                average: dec!(113.05),
            }],
            official_rate: Some("4,105".to_string()),
        })
    }
}

pub fn config(source_url: Option<&str>, overrides: &[(&str, &str)]) -> Config {
    let source_url = source_url.map(str::to_string);
    Config::from_lookup(|key| match key {
        "NBC" => source_url.clone(),
        _ => overrides
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string()),
    })
    .unwrap()
}

pub fn app(provider: Arc<FakeProvider>, source_url: Option<&str>) -> (Router, Arc<AppState>) {
    app_with(provider, source_url, &[])
}

pub fn app_with(
    provider: Arc<FakeProvider>,
    source_url: Option<&str>,
    overrides: &[(&str, &str)],
) -> (Router, Arc<AppState>) {
    let config = config(source_url, overrides);
    let state = build_state_with_provider(&config, provider);
    (app_router(state.clone(), &config), state)
}
