use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::AppState;

/// GET /api/shows - Upcoming talk shows, cached upstream data
pub async fn get_shows(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    match state.aggregator.get_shows().await {
        Ok(shows) => Ok(Json(shows)),
        Err(e) => {
            tracing::error!("Error fetching shows: {}", e);

            let mut body = serde_json::json!({ "error": "Failed to fetch shows" });
            if state.config.is_development() {
                body["message"] = serde_json::Value::String(e.to_string());
            }
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(body)))
        }
    }
}
