use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use nbc_fx_core::{
    cache::SnapshotCache,
    fx::{FxService, FxServiceTrait},
};
use nbc_fx_market_data::{ExchangeRateProvider, NbcProvider, PageDriverConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub fx_service: Arc<dyn FxServiceTrait + Send + Sync>,
    /// Shared with `fx_service`; the sweep task runs against this handle.
    pub snapshot_cache: SnapshotCache,
    /// Upper bound on how long `GET /` waits for rates
    pub request_timeout: Duration,
}

pub fn init_tracing() {
    let log_format = std::env::var("FX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let driver_config = PageDriverConfig {
        table_timeout: config.table_timeout,
        chrome_executable: config.chrome_executable.clone(),
        no_sandbox: config.chrome_no_sandbox,
        ..PageDriverConfig::default()
    };
    let provider: Arc<dyn ExchangeRateProvider> = Arc::new(NbcProvider::new(driver_config)?);
    if let Some(path) = &config.chrome_executable {
        tracing::info!("Using browser executable {}", path.display());
    }
    Ok(build_state_with_provider(config, provider))
}

/// Wires the service around any provider. Tests pass a fake here.
pub fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn ExchangeRateProvider>,
) -> Arc<AppState> {
    if config.source_url.is_none() {
        tracing::warn!("NBC is not set; GET / will fail until it is configured");
    }

    let snapshot_cache = SnapshotCache::new(config.cache_ttl);
    let fx_service = Arc::new(FxService::new(
        provider,
        snapshot_cache.clone(),
        config.source_url.clone(),
    ));

    Arc::new(AppState {
        fx_service,
        snapshot_cache,
        request_timeout: config.request_timeout,
    })
}
