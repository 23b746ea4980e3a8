//! BFAS assessment scoring.
//!
//! Data flows strictly forward: validation, norm selection, aspect scoring,
//! dimension aggregation, pattern detection, then formatting. Every stage
//! is a pure function of its inputs.

mod aggregator;
mod aspect;
mod asymmetry;
mod clinical;
mod demographics;
mod norms;
mod profile;
mod responses;
mod scorer;
mod summary;
mod validator;

pub use aggregator::{aggregate, DimensionScores};
pub use aspect::{Aspect, AspectItemKey, Dimension, ITEM_KEY};
pub use asymmetry::{asymmetries_from_percentiles, detect_asymmetries, Asymmetry, ASYMMETRY_THRESHOLD};
pub use clinical::{
    detect_clinical_patterns, flags_from_percentiles, ClinicalFlag, ClinicalPattern, ClinicalRule,
    Condition, Severity, Threshold, CLINICAL_RULES, ELEVATED, LOW, LOW_DRIVE,
};
pub use demographics::{Demographics, Gender, FEMALE_SYNONYMS, MALE_SYNONYMS, MAX_AGE, MIN_AGE};
pub use norms::{
    female_adjustment, select_norms, select_norms_from, NormEntry, NormSet, NormTable,
    NormTableError, NormTables, SelectedNorms, ESCS_NORMS, FEMALE_ADJUSTMENTS,
    UNIVERSITY_AGE_CUTOFF, UNIVERSITY_NORMS,
};
pub use profile::{calculate_all_scores, Profile, ProfileCalculator};
pub use responses::{ResponseVector, ITEM_COUNT};
pub use scorer::{
    percentile_for_z, raw_score, score_aspect, standard_normal_cdf, z_score, AspectScore,
    AspectScores, PercentileMap,
};
pub use summary::{
    format_summary, AspectSummary, AsymmetrySummary, FlagSummary, ProfileSummary, SummaryMetadata,
};
pub use validator::{validate, AssessmentInput, RawAssessment};
