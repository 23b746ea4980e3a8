//! Respondent demographics used for norm selection.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Youngest age the norm tables cover.
pub const MIN_AGE: i64 = 17;

/// Oldest age the norm tables cover.
pub const MAX_AGE: i64 = 100;

/// Accepted male-identifying inputs (English, Swedish).
pub const MALE_SYNONYMS: &[&str] = &["male", "man", "manlig"];

/// Accepted female-identifying inputs (English, Swedish).
pub const FEMALE_SYNONYMS: &[&str] = &["female", "woman", "kvinna", "kvinnlig"];

/// Gender category recognized by the norm adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parses a case-insensitive gender synonym.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.to_lowercase();
        if FEMALE_SYNONYMS.contains(&normalized.as_str()) {
            Ok(Gender::Female)
        } else if MALE_SYNONYMS.contains(&normalized.as_str()) {
            Ok(Gender::Male)
        } else {
            let accepted: Vec<&str> = MALE_SYNONYMS
                .iter()
                .chain(FEMALE_SYNONYMS.iter())
                .copied()
                .collect();
            Err(ValidationError::unrecognized_gender(value, &accepted))
        }
    }

    pub fn is_female(&self) -> bool {
        matches!(self, Gender::Female)
    }
}

/// Validated age and optional gender of a respondent.
///
/// The gender text is kept as supplied so it can be echoed back in
/// profile metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demographics {
    age: u8,
    gender_text: Option<String>,
    gender: Option<Gender>,
}

impl Demographics {
    /// Validates and builds demographics.
    pub fn new(age: i64, gender: Option<&str>) -> Result<Self, ValidationError> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::out_of_range("age", MIN_AGE, MAX_AGE, age));
        }
        let parsed = gender.map(Gender::parse).transpose()?;

        Ok(Self {
            age: age as u8,
            gender_text: gender.map(str::to_string),
            gender: parsed,
        })
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    /// The gender exactly as the respondent supplied it.
    pub fn gender_text(&self) -> Option<&str> {
        self.gender_text.as_deref()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Returns true if the respondent gave a female-identifying gender.
    pub fn is_female(&self) -> bool {
        self.gender.is_some_and(|g| g.is_female())
    }
}
