//! ScoreAssessment - Command handler that turns raw answers into a profile summary.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::assessment::{
    format_summary, AssessmentInput, NormTables, Profile, ProfileCalculator, ProfileSummary,
    RawAssessment,
};
use crate::domain::foundation::DomainError;

/// Command to score one completed questionnaire.
#[derive(Debug, Clone)]
pub struct ScoreAssessmentCommand {
    pub assessment: RawAssessment,
}

/// Result of scoring: the full profile and its presentation form.
#[derive(Debug, Clone)]
pub struct ScoreAssessmentResult {
    pub profile: Profile,
    pub summary: ProfileSummary,
}

/// Handler for scoring assessments.
///
/// Validation failures surface as `VALIDATION_FAILED` domain errors; no
/// partial profile is ever returned.
#[derive(Debug, Clone)]
pub struct ScoreAssessmentHandler {
    calculator: Arc<ProfileCalculator>,
}

impl ScoreAssessmentHandler {
    pub fn new(calculator: Arc<ProfileCalculator>) -> Self {
        Self { calculator }
    }

    /// The norm tables this handler scores against.
    pub fn norms(&self) -> &NormTables {
        self.calculator.norms()
    }

    pub fn handle(&self, cmd: ScoreAssessmentCommand) -> Result<ScoreAssessmentResult, DomainError> {
        let input = AssessmentInput::try_from(&cmd.assessment).map_err(|err| {
            debug!(field = err.field(), error = %err, "Assessment rejected");
            DomainError::from(err)
        })?;

        let profile = self.calculator.calculate(&input);
        let summary = format_summary(&profile);

        info!(
            norm_set = %profile.norm_set,
            female_adjusted = input.demographics.is_female(),
            asymmetries = profile.asymmetries.len(),
            clinical_flags = profile.clinical_flags.len(),
            "Assessment scored"
        );

        Ok(ScoreAssessmentResult { profile, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{Aspect, NormSet};
    use crate::domain::foundation::ErrorCode;
    use serde_json::{json, Value};

    fn handler() -> ScoreAssessmentHandler {
        ScoreAssessmentHandler::new(Arc::new(ProfileCalculator::default()))
    }

    fn command(responses: Vec<Value>, age: Value, gender: Option<&str>) -> ScoreAssessmentCommand {
        ScoreAssessmentCommand {
            assessment: RawAssessment {
                responses,
                age,
                gender: gender.map(str::to_string),
            },
        }
    }

    #[test]
    fn scores_valid_assessment() {
        let result = handler()
            .handle(command(vec![json!(3); 100], json!(30), None))
            .unwrap();

        assert_eq!(result.summary.metadata.norm_set, NormSet::Escs);
        assert_eq!(result.summary.aspect_scores[&Aspect::Openness].percentile, 11);
        assert_eq!(result.profile.aspect_scores.get(Aspect::Openness).raw_score, 30);
    }

    #[test]
    fn wrong_count_is_validation_error() {
        let err = handler()
            .handle(command(vec![json!(3); 99], json!(30), None))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("responses"));
    }

    #[test]
    fn fractional_answer_is_validation_error() {
        let mut responses = vec![json!(3); 100];
        responses[41] = json!(2.5);
        let err = handler()
            .handle(command(responses, json!(30), None))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.details.get("field").map(String::as_str), Some("item 42"));
    }

    #[test]
    fn unknown_gender_is_validation_error() {
        let err = handler()
            .handle(command(vec![json!(3); 100], json!(30), Some("unknown")))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.message.contains("unknown"));
    }

    #[test]
    fn exposes_calculator_norms() {
        assert_eq!(handler().norms(), &NormTables::builtin());
    }
}
