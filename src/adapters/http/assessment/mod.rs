//! HTTP adapter for assessment endpoints.
//!
//! Exposes the scoring engine via REST API:
//! - `POST /api/assessments/score` - Score 100 responses
//! - `POST /api/assessments/interpret` - Score and interpret
//! - `GET /api/assessments/norms` - Reference norm tables

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, NormSetResponse, NormsResponse};
pub use handlers::{AssessmentApiError, AssessmentAppState};
pub use routes::{assessment_router, assessment_routes};
