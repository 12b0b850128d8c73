use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use nbc_fx_core::fx::ExchangeRateSnapshot;

/// Latest NBC exchange rates, scraped on cache miss.
///
/// The fetch runs in its own task, so a request that times out still leaves a
/// successful scrape in the cache for the next caller.
async fn get_exchange_rates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Arc<ExchangeRateSnapshot>>> {
    let service = state.fx_service.clone();
    let fetch = tokio::spawn(async move { service.get_exchange_rates().await });

    match tokio::time::timeout(state.request_timeout, fetch).await {
        Ok(Ok(result)) => Ok(Json(result?)),
        Ok(Err(e)) => Err(ApiError::Internal(format!("Exchange rate task failed: {}", e))),
        Err(_) => Err(ApiError::Timeout(state.request_timeout)),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_exchange_rates))
}
