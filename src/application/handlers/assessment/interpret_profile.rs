//! InterpretProfile - Scores an assessment and asks the text-generation
//! collaborator for a narrative reading of the result.
//!
//! The profile is always computed first. A provider failure is reported
//! next to the finished summary and never replaces it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::assessment::{ProfileSummary, RawAssessment};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

use super::score_assessment::{ScoreAssessmentCommand, ScoreAssessmentHandler};

/// Narrative deadline used unless [`InterpretProfileHandler::with_deadline`] sets one.
pub const DEFAULT_INTERPRETATION_DEADLINE: Duration = Duration::from_secs(25);

const INTERPRETATION_INSTRUCTIONS: &str = "\
You are an expert personality psychologist interpreting results from the \
Big Five Aspect Scales (BFAS).

Write a personalized, engaging interpretation of 800 to 1200 words that:

1. Opens with a short overview of what makes this profile distinctive.
2. Walks through each of the five dimensions, covering:
   - the percentile for both of its aspects
   - what those scores look like in everyday behavior, with concrete examples
   - any notable asymmetry between the two aspects of the dimension
3. Names two or three key strengths.
4. Notes one or two growth areas, phrased constructively.
5. If clinical flags are present, mentions them sensitively and with a clear \
disclaimer that they are not a diagnosis.

Guidelines:
- Address the reader as \"you\" throughout.
- Be warm and scientifically grounded.
- Avoid clinical or diagnostic language unless flags are present.
- Emphasize the pattern across aspects rather than dimension totals.
- Draw on the reference material for evidence-based statements.
- Close with an empowering reflection.

Do not include:
- a header for each dimension or any other rigid structure
- repeated lists of percentiles
- generic personality descriptions
- medical advice

Write in flowing paragraphs.";

/// Prompt sent to the text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationPrompt {
    pub system: String,
    pub user: String,
}

impl InterpretationPrompt {
    /// Builds the prompt from a formatted profile and optional reference text.
    pub fn build(summary: &ProfileSummary, knowledge_base: Option<&str>) -> Result<Self, DomainError> {
        let profile_json = serde_json::to_string_pretty(summary).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize profile: {}", e),
            )
        })?;

        let mut user = String::new();
        if let Some(reference) = knowledge_base.filter(|kb| !kb.trim().is_empty()) {
            user.push_str("REFERENCE MATERIAL:\n");
            user.push_str(reference.trim_end());
            user.push_str("\n\n");
        }
        user.push_str("PROFILE DATA:\n");
        user.push_str(&profile_json);

        Ok(Self {
            system: INTERPRETATION_INSTRUCTIONS.to_string(),
            user,
        })
    }
}

/// Whether a narrative could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterpretationOutcome {
    Generated { text: String, model: String },
    Unavailable { reason: String },
}

impl InterpretationOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            InterpretationOutcome::Generated { text, .. } => Some(text),
            InterpretationOutcome::Unavailable { .. } => None,
        }
    }
}

/// Downloadable results document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsExport {
    pub scores: ProfileSummary,
    pub interpretation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation_error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ResultsExport {
    pub fn new(scores: ProfileSummary, outcome: InterpretationOutcome) -> Self {
        let (interpretation, interpretation_error) = match outcome {
            InterpretationOutcome::Generated { text, .. } => (Some(text), None),
            InterpretationOutcome::Unavailable { reason } => (None, Some(reason)),
        };
        Self {
            scores,
            interpretation,
            interpretation_error,
            generated_at: Utc::now(),
        }
    }
}

/// Command to score and interpret an assessment.
#[derive(Debug, Clone)]
pub struct InterpretProfileCommand {
    pub assessment: RawAssessment,
}

#[derive(Debug, Clone)]
pub struct InterpretProfileResult {
    pub summary: ProfileSummary,
    pub outcome: InterpretationOutcome,
}

impl InterpretProfileResult {
    pub fn into_export(self) -> ResultsExport {
        ResultsExport::new(self.summary, self.outcome)
    }
}

/// Handler for narrative interpretation.
pub struct InterpretProfileHandler {
    scorer: ScoreAssessmentHandler,
    provider: Arc<dyn AIProvider>,
    knowledge_base: Option<Arc<str>>,
    max_tokens: u32,
    deadline: Duration,
}

impl InterpretProfileHandler {
    pub fn new(
        scorer: ScoreAssessmentHandler,
        provider: Arc<dyn AIProvider>,
        knowledge_base: Option<Arc<str>>,
        max_tokens: u32,
    ) -> Self {
        Self {
            scorer,
            provider,
            knowledge_base,
            max_tokens,
            deadline: DEFAULT_INTERPRETATION_DEADLINE,
        }
    }

    /// Caps the whole provider call, retries included.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Scores first; validation errors propagate and the provider is never called.
    pub async fn handle(
        &self,
        cmd: InterpretProfileCommand,
    ) -> Result<InterpretProfileResult, DomainError> {
        let scored = self.scorer.handle(ScoreAssessmentCommand {
            assessment: cmd.assessment,
        })?;
        let summary = scored.summary;

        let prompt = InterpretationPrompt::build(&summary, self.knowledge_base.as_deref())?;
        let metadata = RequestMetadata::generate();
        let trace_id = metadata.trace_id.clone();
        let request = CompletionRequest::new(metadata)
            .with_system_prompt(prompt.system)
            .with_message(MessageRole::User, prompt.user)
            .with_max_tokens(self.max_tokens);

        let provider = self.provider.provider_info();
        let outcome = match tokio::time::timeout(self.deadline, self.provider.complete(request)).await {
            Ok(Ok(response)) => {
                info!(
                    trace_id = %trace_id,
                    provider = %provider.name,
                    model = %response.model,
                    total_tokens = response.usage.total_tokens,
                    "Interpretation generated"
                );
                InterpretationOutcome::Generated {
                    text: response.content,
                    model: response.model,
                }
            }
            Ok(Err(err)) => {
                warn!(
                    trace_id = %trace_id,
                    provider = %provider.name,
                    model = %provider.model,
                    error = %err,
                    "Interpretation unavailable"
                );
                InterpretationOutcome::Unavailable {
                    reason: err.to_string(),
                }
            }
            Err(_) => {
                warn!(
                    trace_id = %trace_id,
                    provider = %provider.name,
                    model = %provider.model,
                    deadline_ms = self.deadline.as_millis() as u64,
                    "Interpretation deadline exceeded"
                );
                InterpretationOutcome::Unavailable {
                    reason: format!(
                        "interpretation timed out after {}ms",
                        self.deadline.as_millis()
                    ),
                }
            }
        };

        Ok(InterpretProfileResult { summary, outcome })
    }
}
