//! Assessment application handlers.
//!
//! Command handlers for scoring and interpreting BFAS assessments.

mod interpret_profile;
mod score_assessment;

pub use interpret_profile::{
    InterpretProfileCommand, InterpretProfileHandler, InterpretProfileResult,
    InterpretationOutcome, InterpretationPrompt, ResultsExport, DEFAULT_INTERPRETATION_DEADLINE,
};
pub use score_assessment::{ScoreAssessmentCommand, ScoreAssessmentHandler, ScoreAssessmentResult};
