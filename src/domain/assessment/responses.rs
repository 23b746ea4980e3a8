//! The validated 100-item response vector.

use crate::domain::foundation::{LikertResponse, ValidationError};

use super::aspect::AspectItemKey;

/// Number of items in the instrument.
pub const ITEM_COUNT: usize = 100;

/// Exactly [`ITEM_COUNT`] Likert answers in questionnaire order.
///
/// Position `n` (1-indexed) is the answer to item `n`; the collecting layer
/// must not reorder them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVector(Vec<LikertResponse>);

impl ResponseVector {
    /// Validates length and range of raw integer answers.
    pub fn new(responses: &[i64]) -> Result<Self, ValidationError> {
        if responses.len() != ITEM_COUNT {
            return Err(ValidationError::wrong_response_count(
                ITEM_COUNT,
                responses.len(),
            ));
        }

        let answers = responses
            .iter()
            .enumerate()
            .map(|(i, &value)| item_response(i + 1, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(answers))
    }

    /// Returns the answers owned by one aspect, with reverse-coding applied.
    pub fn keyed_answers<'a>(
        &'a self,
        key: &'a AspectItemKey,
    ) -> impl Iterator<Item = LikertResponse> + 'a {
        self.0[key.first_item - 1..key.last_item]
            .iter()
            .zip(key.items())
            .map(move |(answer, item)| {
                if key.is_reverse_coded(item) {
                    answer.reverse_coded()
                } else {
                    *answer
                }
            })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn item_response(position: usize, value: i64) -> Result<LikertResponse, ValidationError> {
    LikertResponse::try_from_i64(value).map_err(|_| {
        ValidationError::out_of_range(
            format!("item {}", position),
            i64::from(LikertResponse::MIN),
            i64::from(LikertResponse::MAX),
            value,
        )
    })
}
