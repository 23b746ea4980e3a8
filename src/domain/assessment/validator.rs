//! Input validation - the precondition check that runs before any scoring.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::ValidationError;

use super::demographics::Demographics;
use super::responses::{ResponseVector, ITEM_COUNT};

/// Checks shape and range of raw inputs without scoring anything.
///
/// Responses are checked before demographics; the first violation is returned.
pub fn validate(responses: &[i64], age: i64, gender: Option<&str>) -> Result<(), ValidationError> {
    AssessmentInput::new(responses, age, gender).map(|_| ())
}

/// Validated inputs for one scoring call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentInput {
    pub responses: ResponseVector,
    pub demographics: Demographics,
}

impl AssessmentInput {
    /// Validates typed integer inputs.
    pub fn new(responses: &[i64], age: i64, gender: Option<&str>) -> Result<Self, ValidationError> {
        let responses = ResponseVector::new(responses)?;
        let demographics = Demographics::new(age, gender)?;
        Ok(Self {
            responses,
            demographics,
        })
    }
}

/// Untyped inputs as they arrive from a JSON collaborator.
///
/// Values are kept as raw JSON so that non-integer answers such as `3.5`
/// or `"4"` are reported as errors instead of being coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAssessment {
    pub responses: Vec<Value>,
    pub age: Value,
    #[serde(default)]
    pub gender: Option<String>,
}

impl TryFrom<&RawAssessment> for AssessmentInput {
    type Error = ValidationError;

    fn try_from(raw: &RawAssessment) -> Result<Self, Self::Error> {
        // Count mismatches take precedence over per-item type errors.
        if raw.responses.len() != ITEM_COUNT {
            return Err(ValidationError::wrong_response_count(
                ITEM_COUNT,
                raw.responses.len(),
            ));
        }

        let responses = raw
            .responses
            .iter()
            .enumerate()
            .map(|(i, value)| integer_value(&format!("item {}", i + 1), value))
            .collect::<Result<Vec<_>, _>>()?;
        let age = integer_value("age", &raw.age)?;
        AssessmentInput::new(&responses, age, raw.gender.as_deref())
    }
}

fn integer_value(field: &str, value: &Value) -> Result<i64, ValidationError> {
    value
        .as_i64()
        .ok_or_else(|| ValidationError::not_integer(field, value.to_string()))
}
