//! Request and response DTOs for assessment endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::assessment::{
    female_adjustment, Aspect, NormEntry, NormSet, NormTables, UNIVERSITY_AGE_CUTOFF,
};
use crate::domain::foundation::DomainError;

/// One reference population in `GET /norms`.
#[derive(Debug, Clone, Serialize)]
pub struct NormSetResponse {
    pub label: NormSet,
    /// Human-readable selection rule.
    pub selected_when: String,
    pub aspects: BTreeMap<Aspect, NormEntry>,
}

/// Body of `GET /norms`.
#[derive(Debug, Clone, Serialize)]
pub struct NormsResponse {
    pub norm_sets: Vec<NormSetResponse>,
    /// Mean shifts applied for female-identifying respondents.
    pub female_adjustments: BTreeMap<Aspect, f64>,
}

impl From<&NormTables> for NormsResponse {
    fn from(tables: &NormTables) -> Self {
        let norm_set = |label: NormSet, selected_when: String| NormSetResponse {
            label,
            selected_when,
            aspects: (*tables.table(label)).into(),
        };

        Self {
            norm_sets: vec![
                norm_set(NormSet::University, format!("age < {}", UNIVERSITY_AGE_CUTOFF)),
                norm_set(NormSet::Escs, format!("age >= {}", UNIVERSITY_AGE_CUTOFF)),
            ],
            female_adjustments: Aspect::ALL
                .into_iter()
                .filter_map(|aspect| female_adjustment(aspect).map(|shift| (aspect, shift)))
                .collect(),
        }
    }
}

/// Error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let details = (!err.details.is_empty()).then(|| {
            Value::Object(
                err.details
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            )
        });

        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;
    use serde_json::json;

    #[test]
    fn norms_response_lists_both_tables() {
        let response = NormsResponse::from(&NormTables::builtin());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["norm_sets"][0]["label"], json!("University"));
        assert_eq!(value["norm_sets"][0]["selected_when"], json!("age < 25"));
        assert_eq!(value["norm_sets"][1]["label"], json!("ESCS"));
        assert_eq!(
            value["norm_sets"][1]["aspects"]["volatility"],
            json!({ "mean": 2.48, "sd": 0.70 })
        );
        assert_eq!(value["female_adjustments"]["withdrawal"], json!(0.28));
        assert_eq!(response.female_adjustments.len(), 3);
    }

    #[test]
    fn error_response_from_validation_error() {
        let err: DomainError = ValidationError::wrong_response_count(100, 99).into();
        let response = ErrorResponse::from(&err);

        assert_eq!(response.code, "VALIDATION_FAILED");
        assert_eq!(response.message, "Expected 100 responses, got 99");
        assert_eq!(response.details, Some(json!({ "field": "responses" })));
    }

    #[test]
    fn error_response_omits_empty_details() {
        let response = ErrorResponse::bad_request("Malformed JSON");
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("details").is_none());
    }
}
