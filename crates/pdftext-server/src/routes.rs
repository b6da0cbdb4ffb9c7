use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        // Health
        .route("/", get(handlers::health::health_check))
        // Extraction
        .route("/extract-pdf", post(handlers::extract::extract_pdf))
        .route("/extract-multiple", post(handlers::extract::extract_multiple))
}
