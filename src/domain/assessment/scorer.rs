//! Aspect Scorer - raw scores, z-scores and percentile ranks per aspect.

use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

use crate::domain::foundation::Percentile;

use super::aspect::Aspect;
use super::norms::{NormEntry, SelectedNorms};
use super::responses::ResponseVector;

/// Score of one aspect against the selected norms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectScore {
    pub aspect: Aspect,
    /// Sum of the ten keyed answers, 10 to 50.
    pub raw_score: u8,
    /// Item mean, `raw_score / 10`, on the 1.0 to 5.0 scale the norms use.
    pub mean_score: f64,
    pub percentile: Percentile,
    pub z_score: f64,
    pub gender_adjusted: bool,
}

/// Sums an aspect's ten answers after reverse-coding.
pub fn raw_score(responses: &ResponseVector, aspect: Aspect) -> u8 {
    responses
        .keyed_answers(aspect.item_key())
        .map(|answer| answer.value())
        .sum()
}

/// Standardizes an item mean against a norm entry.
pub fn z_score(mean_score: f64, norm: NormEntry) -> f64 {
    (mean_score - norm.mean) / norm.sd
}

/// Standard normal cumulative distribution function.
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Percentile rank of a z-score, `round(Φ(z) × 100)` rounded half away from zero.
pub fn percentile_for_z(z: f64) -> Percentile {
    Percentile::from_probability(standard_normal_cdf(z))
}

/// Scores one aspect. Uses full precision throughout.
pub fn score_aspect(responses: &ResponseVector, aspect: Aspect, selected: &SelectedNorms) -> AspectScore {
    let raw = raw_score(responses, aspect);
    let mean_score = f64::from(raw) / 10.0;
    let z = z_score(mean_score, selected.norms.get(aspect));

    AspectScore {
        aspect,
        raw_score: raw,
        mean_score,
        percentile: percentile_for_z(z),
        z_score: z,
        gender_adjusted: selected.is_adjusted(aspect),
    }
}

/// Scores for all ten aspects in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectScores([AspectScore; 10]);

impl AspectScores {
    /// Scores every aspect independently.
    pub fn compute(responses: &ResponseVector, selected: &SelectedNorms) -> Self {
        Self(Aspect::ALL.map(|aspect| score_aspect(responses, aspect, selected)))
    }

    pub fn get(&self, aspect: Aspect) -> &AspectScore {
        &self.0[aspect.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &AspectScore> {
        self.0.iter()
    }

    /// Percentile ranks keyed by aspect.
    pub fn percentiles(&self) -> PercentileMap {
        PercentileMap(self.0.each_ref().map(|score| score.percentile))
    }
}

/// Percentile rank for every aspect; input to both pattern engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileMap([Percentile; 10]);

impl PercentileMap {
    /// Every aspect at the same rank.
    pub fn uniform(percentile: u8) -> Self {
        Self([Percentile::new(percentile); 10])
    }

    /// Returns a copy with one aspect set to the given rank.
    pub fn with(mut self, aspect: Aspect, percentile: u8) -> Self {
        self.0[aspect.index()] = Percentile::new(percentile);
        self
    }

    pub fn get(&self, aspect: Aspect) -> Percentile {
        self.0[aspect.index()]
    }
}
