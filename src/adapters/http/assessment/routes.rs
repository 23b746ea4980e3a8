//! Axum router configuration for assessment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_norms, interpret_assessment, score_assessment, AssessmentAppState};

/// Create the assessment API router.
///
/// # Routes
///
/// - `POST /score` - Score a questionnaire, returns the profile summary
/// - `POST /interpret` - Score and interpret, returns the results export
/// - `GET /norms` - Reference norm tables
pub fn assessment_routes() -> Router<AssessmentAppState> {
    Router::new()
        .route("/score", post(score_assessment))
        .route("/interpret", post(interpret_assessment))
        .route("/norms", get(get_norms))
}

/// Create the assessment module router, mounted at `/api/assessments`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .merge(assessment_router())
///     .with_state(app_state);
/// ```
pub fn assessment_router() -> Router<AssessmentAppState> {
    Router::new().nest("/api/assessments", assessment_routes())
}
