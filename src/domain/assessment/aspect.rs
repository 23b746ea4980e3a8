//! Aspects, dimensions, and the item key that maps questionnaire positions onto them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the ten narrow personality facets measured by the instrument.
///
/// Declaration order is the canonical aspect order used for scoring output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Openness,
    Intellect,
    Industriousness,
    Orderliness,
    Enthusiasm,
    Assertiveness,
    Compassion,
    Politeness,
    Withdrawal,
    Volatility,
}

impl Aspect {
    /// All aspects in canonical order.
    pub const ALL: [Aspect; 10] = [
        Aspect::Openness,
        Aspect::Intellect,
        Aspect::Industriousness,
        Aspect::Orderliness,
        Aspect::Enthusiasm,
        Aspect::Assertiveness,
        Aspect::Compassion,
        Aspect::Politeness,
        Aspect::Withdrawal,
        Aspect::Volatility,
    ];

    /// Position in [`Aspect::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Openness => "openness",
            Aspect::Intellect => "intellect",
            Aspect::Industriousness => "industriousness",
            Aspect::Orderliness => "orderliness",
            Aspect::Enthusiasm => "enthusiasm",
            Aspect::Assertiveness => "assertiveness",
            Aspect::Compassion => "compassion",
            Aspect::Politeness => "politeness",
            Aspect::Withdrawal => "withdrawal",
            Aspect::Volatility => "volatility",
        }
    }

    /// Returns the item key entry for this aspect.
    pub fn item_key(&self) -> &'static AspectItemKey {
        &ITEM_KEY[self.index()]
    }

    /// Returns the dimension this aspect belongs to.
    pub fn dimension(&self) -> Dimension {
        match self {
            Aspect::Openness | Aspect::Intellect => Dimension::OpennessIntellect,
            Aspect::Industriousness | Aspect::Orderliness => Dimension::Conscientiousness,
            Aspect::Enthusiasm | Aspect::Assertiveness => Dimension::Extraversion,
            Aspect::Compassion | Aspect::Politeness => Dimension::Agreeableness,
            Aspect::Withdrawal | Aspect::Volatility => Dimension::Neuroticism,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Aspect {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aspect::ALL
            .into_iter()
            .find(|aspect| aspect.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("aspect", format!("unknown aspect '{}'", s)))
    }
}

/// Questionnaire positions owned by one aspect.
///
/// Positions are 1-indexed and the range is inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectItemKey {
    pub aspect: Aspect,
    pub first_item: usize,
    pub last_item: usize,
    pub reverse_items: [usize; 2],
}

impl AspectItemKey {
    /// Returns true if the given 1-indexed position is reverse-coded.
    pub fn is_reverse_coded(&self, item: usize) -> bool {
        self.reverse_items.contains(&item)
    }

    /// Iterates over the 1-indexed positions of this aspect.
    pub fn items(&self) -> impl Iterator<Item = usize> {
        self.first_item..=self.last_item
    }

    /// Number of items scored for this aspect.
    pub fn len(&self) -> usize {
        self.last_item - self.first_item + 1
    }

    /// Always false; every aspect owns items.
    pub fn is_empty(&self) -> bool {
        false
    }
}

const fn key(aspect: Aspect, first_item: usize) -> AspectItemKey {
    AspectItemKey {
        aspect,
        first_item,
        last_item: first_item + 9,
        reverse_items: [first_item + 8, first_item + 9],
    }
}

/// Item key for the 100-item instrument, indexed by [`Aspect::index`].
pub const ITEM_KEY: [AspectItemKey; 10] = [
    key(Aspect::Openness, 1),
    key(Aspect::Intellect, 11),
    key(Aspect::Industriousness, 21),
    key(Aspect::Orderliness, 31),
    key(Aspect::Enthusiasm, 41),
    key(Aspect::Assertiveness, 51),
    key(Aspect::Compassion, 61),
    key(Aspect::Politeness, 71),
    key(Aspect::Withdrawal, 81),
    key(Aspect::Volatility, 91),
];

/// One of the five broad personality domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    OpennessIntellect,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Dimension; 5] = [
        Dimension::OpennessIntellect,
        Dimension::Conscientiousness,
        Dimension::Extraversion,
        Dimension::Agreeableness,
        Dimension::Neuroticism,
    ];

    /// Position in [`Dimension::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::OpennessIntellect => "openness_intellect",
            Dimension::Conscientiousness => "conscientiousness",
            Dimension::Extraversion => "extraversion",
            Dimension::Agreeableness => "agreeableness",
            Dimension::Neuroticism => "neuroticism",
        }
    }

    /// The two aspects composing this dimension, in item order.
    pub fn aspects(&self) -> [Aspect; 2] {
        match self {
            Dimension::OpennessIntellect => [Aspect::Openness, Aspect::Intellect],
            Dimension::Conscientiousness => [Aspect::Industriousness, Aspect::Orderliness],
            Dimension::Extraversion => [Aspect::Enthusiasm, Aspect::Assertiveness],
            Dimension::Agreeableness => [Aspect::Compassion, Aspect::Politeness],
            Dimension::Neuroticism => [Aspect::Withdrawal, Aspect::Volatility],
        }
    }

    /// The aspect pair as reported in asymmetry records.
    ///
    /// Matches [`Dimension::aspects`] except for openness/intellect, which is
    /// reported intellect first.
    pub fn asymmetry_pair(&self) -> [Aspect; 2] {
        match self {
            Dimension::OpennessIntellect => [Aspect::Intellect, Aspect::Openness],
            other => other.aspects(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
