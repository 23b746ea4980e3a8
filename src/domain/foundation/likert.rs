//! Likert response value object (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// One questionnaire answer: 1 (strongly disagree) to 5 (strongly agree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
#[repr(u8)]
pub enum LikertResponse {
    StronglyDisagree = 1,
    Disagree = 2,
    Neutral = 3,
    Agree = 4,
    StronglyAgree = 5,
}

impl LikertResponse {
    /// Lowest point on the scale.
    pub const MIN: u8 = 1;

    /// Highest point on the scale.
    pub const MAX: u8 = 5;

    /// Creates a response from an integer, returning error if out of range.
    pub fn try_from_i64(value: i64) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(LikertResponse::StronglyDisagree),
            2 => Ok(LikertResponse::Disagree),
            3 => Ok(LikertResponse::Neutral),
            4 => Ok(LikertResponse::Agree),
            5 => Ok(LikertResponse::StronglyAgree),
            _ => Err(ValidationError::out_of_range(
                "response",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                value,
            )),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns the scale-inverse answer (6 - value).
    ///
    /// Applying it twice yields the original response.
    pub fn reverse_coded(&self) -> Self {
        match self {
            LikertResponse::StronglyDisagree => LikertResponse::StronglyAgree,
            LikertResponse::Disagree => LikertResponse::Agree,
            LikertResponse::Neutral => LikertResponse::Neutral,
            LikertResponse::Agree => LikertResponse::Disagree,
            LikertResponse::StronglyAgree => LikertResponse::StronglyDisagree,
        }
    }
}

impl TryFrom<i64> for LikertResponse {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from_i64(value)
    }
}

impl From<LikertResponse> for u8 {
    fn from(response: LikertResponse) -> Self {
        response.value()
    }
}

impl fmt::Display for LikertResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
