//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    InterpretProfileCommand, InterpretProfileHandler, InterpretProfileResult,
    InterpretationOutcome, InterpretationPrompt, ResultsExport, ScoreAssessmentCommand,
    ScoreAssessmentHandler, ScoreAssessmentResult,
};
