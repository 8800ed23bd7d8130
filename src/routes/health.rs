use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::sync::Arc;

use crate::services::aggregator::CacheStatus;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    uptime: u64,
    upstream: String,
    upstream_configured: bool,
    cache: CacheStatus,
}

/// GET /health - Service and cache state
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let configured = state.config.upstream_url.is_some();

    let health = HealthResponse {
        // Without an upstream URL every query fails
        status: if configured { "ok" } else { "unconfigured" }.to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        upstream: state.aggregator.upstream_kind().to_string(),
        upstream_configured: configured,
        cache: state.aggregator.cache_status().await,
    };

    Json(health)
}

/// GET /metrics - Prometheus metrics
pub async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                b"Internal Server Error".to_vec(),
            )
        }
    }
}

/// Readiness probe (for Kubernetes)
pub async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.config.upstream_url.is_some() {
        (StatusCode::OK, "ready".to_string())
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!(
                "not ready - {} missing",
                state.config.upstream_kind.url_var()
            ),
        )
    }
}

/// Liveness probe (for Kubernetes)
pub async fn live() -> impl IntoResponse {
    (StatusCode::OK, "alive")
}
