//! Liveness probe that also checks the dataset can still be loaded

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: i64,
    athletes: Option<usize>,
}

/// 200 with the athlete count, or 503 when the store cannot be read
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, athletes) = match state.athletes.list().await {
        Ok(athletes) => ("ok", StatusCode::OK, Some(athletes.len())),
        Err(e) => {
            warn!("Health check could not load dataset: {}", e);
            ("degraded", StatusCode::SERVICE_UNAVAILABLE, None)
        }
    };

    let response = HealthResponse {
        status,
        timestamp: chrono::Utc::now().timestamp(),
        athletes,
    };

    (code, Json(response))
}
