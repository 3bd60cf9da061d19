use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::utils::time::current_timestamp;

#[derive(Debug, Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: i64,
}

/// Health check handler
///
/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            timestamp: current_timestamp(),
        }),
    )
}
