//! Percentile rank value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer percentile rank between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentile(u8);

impl Percentile {
    /// Zeroth percentile.
    pub const ZERO: Self = Self(0);

    /// One hundredth percentile.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentile, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::HUNDRED.0))
    }

    /// Converts a cumulative probability into a rank.
    ///
    /// The scaled value is rounded half away from zero, so 74.5 ranks as 75
    /// and 25.5 ranks as 26. Probabilities outside [0, 1] and NaN clamp to
    /// the nearest end of the scale.
    pub fn from_probability(probability: f64) -> Self {
        if probability.is_nan() {
            return Self::ZERO;
        }
        Self::from_scaled(probability * 100.0)
    }

    /// Rounds an already-scaled 0-100 value into a rank.
    pub fn from_scaled(value: f64) -> Self {
        let rounded = value.round().clamp(0.0, 100.0);
        Self(rounded as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Absolute distance between two ranks in percentile points.
    pub fn distance(&self, other: Percentile) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl Default for Percentile {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
