pub mod health;
pub mod shows;

use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Fallback for unknown paths
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files =
        ServeDir::new(&state.config.static_dir).not_found_service(not_found.into_service());

    Router::new()
        // API
        .route("/api/shows", get(shows::get_shows))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/ready", get(health::ready))
        .route("/live", get(health::live))
        // Static frontend, JSON 404 for anything else
        .fallback_service(static_files)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{BroadcastStart, ChannelRef, RawBroadcast};
    use crate::services::aggregator::ShowAggregator;
    use crate::services::upstream::testing::StubSource;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    fn state(stub: Arc<StubSource>, env: &[(&str, &str)]) -> Arc<AppState> {
        let vars: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::from_lookup(|key| {
            vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        });

        Arc::new(AppState {
            config,
            aggregator: ShowAggregator::new(stub, Duration::from_secs(7200)),
            start_time: Instant::now(),
        })
    }

    fn stub() -> Arc<StubSource> {
        Arc::new(StubSource::new(vec![RawBroadcast {
            title: "Hart aber fair".to_string(),
            start: BroadcastStart::Instant(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
            description: None,
            duration: None,
            image: None,
            channel: ChannelRef {
                id: Some("71".to_string()),
                name: None,
            },
        }]))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_get_shows_json() {
        let app = router(state(stub(), &[("API_URL", "http://upstream.test")]));
        let (status, body) = get(app, "/api/shows").await;

        assert_eq!(status, StatusCode::OK);
        let shows = body.as_array().unwrap();
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0]["channel"], "Das Erste");
        assert_eq!(shows[0]["type"], "hart aber fair");
        assert_eq!(shows[0]["date"], "2023-11-14T22:13:20Z");
        assert_eq!(shows[0]["channelUrl"], "https://www.ardmediathek.de/live");
    }

    #[tokio::test]
    async fn test_error_is_generic_in_production() {
        let source = stub();
        source.set_failing(true);
        let app = router(state(source, &[]));
        let (status, body) = get(app, "/api/shows").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch shows");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_error_detail_in_development() {
        let source = stub();
        source.set_failing(true);
        let app = router(state(source, &[("APP_ENV", "development")]));
        let (status, body) = get(app, "/api/shows").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().contains("stub failure"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let app = router(state(stub(), &[("STATIC_DIR", "/nonexistent-static-dir")]));
        let (status, body) = get(app, "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn test_health_reports_cache() {
        let source = stub();
        let app = router(state(source, &[("API_URL", "http://upstream.test")]));

        let (_, before) = get(app.clone(), "/health").await;
        assert_eq!(before["status"], "ok");
        assert_eq!(before["upstream"], "api");
        assert_eq!(before["cache"]["populated"], false);

        get(app.clone(), "/api/shows").await;
        let (_, after) = get(app, "/health").await;
        assert_eq!(after["cache"]["populated"], true);
        assert_eq!(after["cache"]["entries"], 1);
    }
}
