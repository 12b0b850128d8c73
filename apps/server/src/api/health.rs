use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Router};

async fn healthz() -> &'static str {
    "ok"
}

/// Not ready until the source page URL is configured.
async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if state.fx_service.is_configured() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "source url not configured")
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
