use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use pdftext_core::api_types::HealthResponse;

/// Reports healthy unconditionally; the service holds no state worth probing.
pub async fn health_check() -> impl IntoResponse {
    info!("Health check requested");
    (StatusCode::OK, Json(HealthResponse::healthy()))
}
