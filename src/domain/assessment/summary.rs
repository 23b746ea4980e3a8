//! Profile Formatter - the serializable summary handed to collaborators.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::aspect::{Aspect, Dimension};
use super::asymmetry::Asymmetry;
use super::clinical::{ClinicalFlag, ClinicalPattern, Severity};
use super::norms::NormSet;
use super::profile::Profile;
use super::scorer::AspectScore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub age: u8,
    pub gender: Option<String>,
    pub norm_set: NormSet,
}

/// One aspect's score, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSummary {
    pub raw_score: u8,
    pub mean_score: f64,
    pub percentile: u8,
    pub z_score: f64,
    pub gender_adjusted: bool,
}

impl From<&AspectScore> for AspectSummary {
    fn from(score: &AspectScore) -> Self {
        Self {
            raw_score: score.raw_score,
            mean_score: round_2dp(score.mean_score),
            percentile: score.percentile.value(),
            z_score: round_2dp(score.z_score),
            gender_adjusted: score.gender_adjusted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsymmetrySummary {
    pub domain: Dimension,
    pub higher_aspect: Aspect,
    pub percentile_difference: u8,
    pub aspects: [Aspect; 2],
}

impl From<&Asymmetry> for AsymmetrySummary {
    fn from(asymmetry: &Asymmetry) -> Self {
        Self {
            domain: asymmetry.dimension,
            higher_aspect: asymmetry.higher_aspect,
            percentile_difference: asymmetry.percentile_difference,
            aspects: asymmetry.aspects,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSummary {
    pub pattern: ClinicalPattern,
    pub severity: Severity,
    pub aspects: Vec<Aspect>,
    pub message: String,
    pub recommendation: String,
}

impl From<&ClinicalFlag> for FlagSummary {
    fn from(flag: &ClinicalFlag) -> Self {
        Self {
            pattern: flag.pattern,
            severity: flag.severity,
            aspects: flag.aspects_involved.clone(),
            message: flag.message.clone(),
            recommendation: flag.recommendation.clone(),
        }
    }
}

/// Presentation form of a [`Profile`].
///
/// Maps are keyed by enums whose `Ord` follows canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub metadata: SummaryMetadata,
    pub aspect_scores: BTreeMap<Aspect, AspectSummary>,
    pub dimension_scores: BTreeMap<Dimension, u8>,
    pub asymmetries: Vec<AsymmetrySummary>,
    pub clinical_flags: Vec<FlagSummary>,
}

impl ProfileSummary {
    /// Converts to a JSON object map.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Builds the summary. Rounding happens here and nowhere upstream.
pub fn format_summary(profile: &Profile) -> ProfileSummary {
    ProfileSummary {
        metadata: SummaryMetadata {
            age: profile.age,
            gender: profile.gender.clone(),
            norm_set: profile.norm_set,
        },
        aspect_scores: profile
            .aspect_scores
            .iter()
            .map(|score| (score.aspect, AspectSummary::from(score)))
            .collect(),
        dimension_scores: profile.dimension_scores.to_map(),
        asymmetries: profile.asymmetries.iter().map(AsymmetrySummary::from).collect(),
        clinical_flags: profile.clinical_flags.iter().map(FlagSummary::from).collect(),
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
