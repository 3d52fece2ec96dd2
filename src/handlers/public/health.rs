use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::database::pool;
use crate::AppState;

/// GET / - fixed liveness payload, served without touching the database
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "KPA Form Data API is running"
    }))
}

/// GET /health - readiness check that pings the database
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match pool::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "reachable" })),
        ),
        Err(err) => {
            tracing::error!("Health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "database": "unreachable" })),
            )
        }
    }
}
