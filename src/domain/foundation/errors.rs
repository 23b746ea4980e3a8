//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised when raw assessment input fails shape or range checks.
///
/// This is the only error category the scoring core produces. Inputs are
/// never corrected silently; the caller gets the first violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Expected {expected} responses, got {actual}")]
    WrongResponseCount { expected: usize, actual: usize },

    #[error("Field '{field}' must be an integer, got {actual}")]
    NotInteger { field: String, actual: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Gender '{value}' is not recognized, expected one of [{accepted}] or none")]
    UnrecognizedGender { value: String, accepted: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a wrong response count error.
    pub fn wrong_response_count(expected: usize, actual: usize) -> Self {
        ValidationError::WrongResponseCount { expected, actual }
    }

    /// Creates a non-integer value error.
    pub fn not_integer(field: impl Into<String>, actual: impl Into<String>) -> Self {
        ValidationError::NotInteger {
            field: field.into(),
            actual: actual.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an unrecognized gender error listing the accepted values.
    pub fn unrecognized_gender(value: impl Into<String>, accepted: &[&str]) -> Self {
        ValidationError::UnrecognizedGender {
            value: value.into(),
            accepted: accepted.join(", "),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field, where there is one.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::WrongResponseCount { .. } => "responses",
            ValidationError::NotInteger { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
            ValidationError::UnrecognizedGender { .. } => "gender",
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true if this error was caused by bad caller input.
    pub fn is_validation(&self) -> bool {
        self.code == ErrorCode::ValidationFailed
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::validation(field, err.to_string())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
