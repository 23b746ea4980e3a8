//! HTTP adapters - REST API implementations.

pub mod assessment;

use axum::{routing::get, Json, Router};
use serde::Serialize;

pub use assessment::{assessment_router, AssessmentAppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Application router without middleware layers.
pub fn app_router(state: AssessmentAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(assessment_router())
        .with_state(state)
}
