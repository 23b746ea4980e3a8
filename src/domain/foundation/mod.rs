//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary
//! of the assessment domain.

mod errors;
mod likert;
mod percentile;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use likert::LikertResponse;
pub use percentile::Percentile;
