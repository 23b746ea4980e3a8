//! Scoring pipeline: validated input in, complete profile out.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::aggregator::{aggregate, DimensionScores};
use super::asymmetry::{detect_asymmetries, Asymmetry};
use super::clinical::{detect_clinical_patterns, ClinicalFlag};
use super::norms::{select_norms_from, NormSet, NormTables};
use super::scorer::AspectScores;
use super::validator::AssessmentInput;

/// Full result of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub aspect_scores: AspectScores,
    pub dimension_scores: DimensionScores,
    pub asymmetries: Vec<Asymmetry>,
    pub clinical_flags: Vec<ClinicalFlag>,
    pub age: u8,
    /// Gender as supplied by the respondent.
    pub gender: Option<String>,
    pub norm_set: NormSet,
}

/// Runs validated input through norm selection, scoring and detection.
///
/// Holds the norm tables it scores against; each call copies the entries it
/// needs, so one calculator can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ProfileCalculator {
    norms: NormTables,
}

impl ProfileCalculator {
    pub fn new(norms: NormTables) -> Self {
        Self { norms }
    }

    pub fn norms(&self) -> &NormTables {
        &self.norms
    }

    pub fn calculate(&self, input: &AssessmentInput) -> Profile {
        let selected = select_norms_from(&self.norms, &input.demographics);
        let aspect_scores = AspectScores::compute(&input.responses, &selected);
        let dimension_scores = aggregate(&aspect_scores);
        let asymmetries = detect_asymmetries(&aspect_scores);
        let clinical_flags = detect_clinical_patterns(&aspect_scores);

        Profile {
            aspect_scores,
            dimension_scores,
            asymmetries,
            clinical_flags,
            age: input.demographics.age(),
            gender: input.demographics.gender_text().map(str::to_string),
            norm_set: selected.norm_set,
        }
    }

    /// Validates then scores.
    pub fn calculate_from(
        &self,
        responses: &[i64],
        age: i64,
        gender: Option<&str>,
    ) -> Result<Profile, ValidationError> {
        let input = AssessmentInput::new(responses, age, gender)?;
        Ok(self.calculate(&input))
    }
}

/// Validates and scores against the published norm tables.
pub fn calculate_all_scores(
    responses: &[i64],
    age: i64,
    gender: Option<&str>,
) -> Result<Profile, ValidationError> {
    ProfileCalculator::default().calculate_from(responses, age, gender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::aspect::{Aspect, Dimension};
    use crate::domain::assessment::clinical::ClinicalPattern;

    #[test]
    fn neutral_profile_uses_escs_at_30() {
        let profile = calculate_all_scores(&[3; 100], 30, None).unwrap();

        assert_eq!(profile.norm_set, NormSet::Escs);
        assert_eq!(profile.age, 30);
        assert_eq!(profile.gender, None);
        for score in profile.aspect_scores.iter() {
            assert_eq!(score.raw_score, 30);
            assert_eq!(score.mean_score, 3.0);
        }
        for (_, sum) in profile.dimension_scores.iter() {
            assert_eq!(sum, 60);
        }
    }

    #[test]
    fn neutral_profile_percentiles_follow_escs_norms() {
        let profile = calculate_all_scores(&[3; 100], 30, None).unwrap();
        let expected = [
            (Aspect::Openness, 11),
            (Aspect::Intellect, 15),
            (Aspect::Industriousness, 9),
            (Aspect::Orderliness, 12),
            (Aspect::Enthusiasm, 21),
            (Aspect::Assertiveness, 30),
            (Aspect::Compassion, 2),
            (Aspect::Politeness, 2),
            (Aspect::Withdrawal, 78),
            (Aspect::Volatility, 77),
        ];
        for (aspect, percentile) in expected {
            assert_eq!(
                profile.aspect_scores.get(aspect).percentile.value(),
                percentile,
                "{}",
                aspect
            );
        }
    }

    #[test]
    fn neutral_profile_has_no_asymmetries_but_fires_elevated_neuroticism_rules() {
        let profile = calculate_all_scores(&[3; 100], 30, None).unwrap();
        let patterns: Vec<ClinicalPattern> =
            profile.clinical_flags.iter().map(|f| f.pattern).collect();

        assert!(profile.asymmetries.is_empty());
        assert_eq!(
            patterns,
            vec![
                ClinicalPattern::MaxDysregulation,
                ClinicalPattern::AggressionRisk,
                ClinicalPattern::ImpulsiveSelfHarm,
            ]
        );
    }

    #[test]
    fn young_respondent_uses_university_norms() {
        let profile = calculate_all_scores(&[3; 100], 24, Some("Male")).unwrap();
        assert_eq!(profile.norm_set, NormSet::University);
        assert_eq!(profile.gender.as_deref(), Some("Male"));
        assert_eq!(
            profile.aspect_scores.get(Aspect::Industriousness).percentile.value(),
            59
        );
    }

    #[test]
    fn invalid_input_returns_no_profile() {
        assert!(calculate_all_scores(&[3; 99], 30, None).is_err());
        assert!(calculate_all_scores(&[3; 100], 16, None).is_err());
        assert!(calculate_all_scores(&[3; 100], 30, Some("unknown")).is_err());
    }

    #[test]
    fn calculator_scores_against_its_own_tables() {
        let mut tables = NormTables::builtin();
        tables.escs = tables.escs.with_mean_shift(Aspect::Openness, -0.74);
        let profile = ProfileCalculator::new(tables)
            .calculate_from(&[3; 100], 40, None)
            .unwrap();

        assert_eq!(profile.aspect_scores.get(Aspect::Openness).percentile.value(), 50);
        // intellect 15 vs openness 50
        assert_eq!(profile.asymmetries.len(), 1);
        assert_eq!(profile.asymmetries[0].dimension, Dimension::OpennessIntellect);
        assert_eq!(profile.asymmetries[0].higher_aspect, Aspect::Openness);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let calculator = ProfileCalculator::default();
        let first = calculator.calculate_from(&[4; 100], 52, Some("female")).unwrap();
        let second = calculator.calculate_from(&[4; 100], 52, Some("female")).unwrap();
        assert_eq!(first, second);
    }
}
