//! Dimension Aggregator - sums aspect pairs into dimension scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aspect::Dimension;
use super::scorer::AspectScores;

/// Raw dimension sums, 20 to 100 each. Not percentiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScores([u8; 5]);

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> u8 {
        self.0[dimension.index()]
    }

    /// Iterates over (dimension, score) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }

    pub fn to_map(&self) -> BTreeMap<Dimension, u8> {
        self.iter().collect()
    }
}

/// Sums the raw scores of each dimension's two aspects.
pub fn aggregate(scores: &AspectScores) -> DimensionScores {
    DimensionScores(Dimension::ALL.map(|dimension| {
        dimension
            .aspects()
            .iter()
            .map(|aspect| scores.get(*aspect).raw_score)
            .sum()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::demographics::Demographics;
    use crate::domain::assessment::norms::select_norms;
    use crate::domain::assessment::responses::ResponseVector;

    fn scores_for(values: &[i64]) -> AspectScores {
        let selected = select_norms(&Demographics::new(30, None).unwrap());
        AspectScores::compute(&ResponseVector::new(values).unwrap(), &selected)
    }

    #[test]
    fn neutral_profile_sums_to_60_per_dimension() {
        let dimensions = aggregate(&scores_for(&[3; 100]));
        for (_, score) in dimensions.iter() {
            assert_eq!(score, 60);
        }
    }

    #[test]
    fn dimension_sums_its_own_aspects() {
        let mut values = [3i64; 100];
        // Industriousness items 21-28 at 5, reverse items 29-30 at 1 -> 50
        for v in values.iter_mut().take(28).skip(20) {
            *v = 5;
        }
        values[28] = 1;
        values[29] = 1;
        let dimensions = aggregate(&scores_for(&values));

        assert_eq!(dimensions.get(Dimension::Conscientiousness), 80);
        assert_eq!(dimensions.get(Dimension::Extraversion), 60);
    }

    #[test]
    fn extreme_profiles_stay_within_20_to_100() {
        let mut low = [1i64; 100];
        let mut high = [5i64; 100];
        for key in crate::domain::assessment::aspect::ITEM_KEY.iter() {
            for item in key.reverse_items {
                low[item - 1] = 5;
                high[item - 1] = 1;
            }
        }
        for (_, score) in aggregate(&scores_for(&low)).iter() {
            assert_eq!(score, 20);
        }
        for (_, score) in aggregate(&scores_for(&high)).iter() {
            assert_eq!(score, 100);
        }
    }

    #[test]
    fn to_map_is_keyed_by_dimension() {
        let map = aggregate(&scores_for(&[3; 100])).to_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map.get(&Dimension::Neuroticism), Some(&60));
    }
}
