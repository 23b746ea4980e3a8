//! Asymmetry Engine - within-dimension aspect imbalances.

use serde::{Deserialize, Serialize};

use super::aspect::{Aspect, Dimension};
use super::scorer::{AspectScores, PercentileMap};

/// Minimum percentile gap between a dimension's aspects that counts as an imbalance.
pub const ASYMMETRY_THRESHOLD: u8 = 15;

/// A detected imbalance between the two aspects of one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asymmetry {
    pub dimension: Dimension,
    /// The pair in reporting order, see [`Dimension::asymmetry_pair`].
    pub aspects: [Aspect; 2],
    pub percentile_difference: u8,
    pub higher_aspect: Aspect,
}

impl Asymmetry {
    pub fn lower_aspect(&self) -> Aspect {
        if self.aspects[0] == self.higher_aspect {
            self.aspects[1]
        } else {
            self.aspects[0]
        }
    }
}

/// Checks every dimension for an imbalance.
pub fn detect_asymmetries(scores: &AspectScores) -> Vec<Asymmetry> {
    asymmetries_from_percentiles(&scores.percentiles())
}

/// Checks every dimension independently; output follows dimension order.
pub fn asymmetries_from_percentiles(percentiles: &PercentileMap) -> Vec<Asymmetry> {
    Dimension::ALL
        .into_iter()
        .filter_map(|dimension| check_dimension(dimension, percentiles))
        .collect()
}

fn check_dimension(dimension: Dimension, percentiles: &PercentileMap) -> Option<Asymmetry> {
    let [first, second] = dimension.asymmetry_pair();
    let first_pct = percentiles.get(first);
    let second_pct = percentiles.get(second);
    let difference = first_pct.distance(second_pct);

    if difference < ASYMMETRY_THRESHOLD {
        return None;
    }

    // A gap of at least the threshold rules out ties.
    let higher_aspect = if first_pct > second_pct { first } else { second };

    Some(Asymmetry {
        dimension,
        aspects: [first, second],
        percentile_difference: difference,
        higher_aspect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_profile_has_no_asymmetries() {
        assert!(asymmetries_from_percentiles(&PercentileMap::uniform(50)).is_empty());
    }

    #[test]
    fn difference_of_14_does_not_fire() {
        let map = PercentileMap::uniform(50).with(Aspect::Volatility, 64);
        assert!(asymmetries_from_percentiles(&map).is_empty());
    }

    #[test]
    fn difference_of_15_fires() {
        let map = PercentileMap::uniform(50).with(Aspect::Volatility, 65);
        let found = asymmetries_from_percentiles(&map);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dimension, Dimension::Neuroticism);
        assert_eq!(found[0].percentile_difference, 15);
        assert_eq!(found[0].higher_aspect, Aspect::Volatility);
        assert_eq!(found[0].lower_aspect(), Aspect::Withdrawal);
    }

    #[test]
    fn higher_aspect_may_be_either_member() {
        let map = PercentileMap::uniform(50).with(Aspect::Openness, 90);
        let found = asymmetries_from_percentiles(&map);

        assert_eq!(found[0].aspects, [Aspect::Intellect, Aspect::Openness]);
        assert_eq!(found[0].higher_aspect, Aspect::Openness);

        let map = PercentileMap::uniform(50).with(Aspect::Openness, 10);
        let found = asymmetries_from_percentiles(&map);
        assert_eq!(found[0].higher_aspect, Aspect::Intellect);
        assert_eq!(found[0].percentile_difference, 40);
    }

    #[test]
    fn all_five_dimensions_can_fire_in_order() {
        let map = PercentileMap::uniform(20)
            .with(Aspect::Intellect, 80)
            .with(Aspect::Industriousness, 80)
            .with(Aspect::Enthusiasm, 80)
            .with(Aspect::Compassion, 80)
            .with(Aspect::Withdrawal, 80);
        let found = asymmetries_from_percentiles(&map);

        let dimensions: Vec<Dimension> = found.iter().map(|a| a.dimension).collect();
        assert_eq!(dimensions, Dimension::ALL.to_vec());
        assert!(found.iter().all(|a| a.percentile_difference == 60));
    }

    #[test]
    fn cross_dimension_gaps_are_ignored() {
        let map = PercentileMap::uniform(50)
            .with(Aspect::Openness, 95)
            .with(Aspect::Intellect, 95);
        assert!(asymmetries_from_percentiles(&map).is_empty());
    }
}
