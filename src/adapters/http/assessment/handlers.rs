//! HTTP handlers for assessment endpoints.
//!
//! These handlers connect Axum routes to the application layer handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::assessment::{
    InterpretProfileCommand, InterpretProfileHandler, ScoreAssessmentCommand,
    ScoreAssessmentHandler,
};
use crate::domain::assessment::RawAssessment;
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{ErrorResponse, NormsResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for assessment endpoints.
#[derive(Clone)]
pub struct AssessmentAppState {
    pub scorer: ScoreAssessmentHandler,
    pub interpreter: Arc<InterpretProfileHandler>,
}

impl AssessmentAppState {
    pub fn new(scorer: ScoreAssessmentHandler, interpreter: Arc<InterpretProfileHandler>) -> Self {
        Self {
            scorer,
            interpreter,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/assessments/score - Score a completed questionnaire
pub async fn score_assessment(
    State(state): State<AssessmentAppState>,
    body: Result<Json<RawAssessment>, JsonRejection>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let Json(assessment) = body?;
    let result = state.scorer.handle(ScoreAssessmentCommand { assessment })?;

    Ok(Json(result.summary))
}

/// POST /api/assessments/interpret - Score and generate a narrative interpretation
pub async fn interpret_assessment(
    State(state): State<AssessmentAppState>,
    body: Result<Json<RawAssessment>, JsonRejection>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let Json(assessment) = body?;
    let result = state
        .interpreter
        .handle(InterpretProfileCommand { assessment })
        .await?;

    Ok(Json(result.into_export()))
}

/// GET /api/assessments/norms - Reference norm tables in use
pub async fn get_norms(State(state): State<AssessmentAppState>) -> impl IntoResponse {
    Json(NormsResponse::from(state.scorer.norms()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub enum AssessmentApiError {
    /// Request body was not valid JSON of the expected shape.
    MalformedBody(String),
    Domain(DomainError),
}

impl From<JsonRejection> for AssessmentApiError {
    fn from(rejection: JsonRejection) -> Self {
        AssessmentApiError::MalformedBody(rejection.body_text())
    }
}

impl From<DomainError> for AssessmentApiError {
    fn from(err: DomainError) -> Self {
        AssessmentApiError::Domain(err)
    }
}

impl AssessmentApiError {
    fn status(&self) -> StatusCode {
        match self {
            AssessmentApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AssessmentApiError::Domain(err) => match err.code {
                ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
                ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AssessmentApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = match &self {
            AssessmentApiError::MalformedBody(msg) => ErrorResponse::bad_request(msg.clone()),
            AssessmentApiError::Domain(err) => ErrorResponse::from(err),
        };

        if status.is_server_error() {
            tracing::error!(code = %error.code, message = %error.message, "Assessment request failed");
        }

        (status, Json(error)).into_response()
    }
}
