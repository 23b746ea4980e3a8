//! Reference norm tables and per-respondent norm selection.
//!
//! The two published tables are compile-time constants. Selection always
//! works on a copy, so per-call demographic adjustments can never leak into
//! another scoring call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

use super::aspect::Aspect;
use super::demographics::Demographics;

/// Respondents younger than this are compared against university norms.
pub const UNIVERSITY_AGE_CUTOFF: u8 = 25;

/// Mean shifts applied for female-identifying respondents.
pub const FEMALE_ADJUSTMENTS: [(Aspect, f64); 3] = [
    (Aspect::Compassion, 0.24),
    (Aspect::Withdrawal, 0.28),
    (Aspect::Politeness, 0.19),
];

/// Returns the female mean shift for an aspect, if it carries one.
pub fn female_adjustment(aspect: Aspect) -> Option<f64> {
    FEMALE_ADJUSTMENTS
        .iter()
        .find(|(adjusted, _)| *adjusted == aspect)
        .map(|(_, shift)| *shift)
}

/// Item-mean distribution of one aspect in a reference population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormEntry {
    pub mean: f64,
    pub sd: f64,
}

impl NormEntry {
    pub const fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd }
    }
}

/// Which reference population a profile was standardized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormSet {
    /// University sample (N=480, ages 17-61).
    University,
    /// Eugene-Springfield community sample (N=481, ages 20-85).
    #[serde(rename = "ESCS")]
    Escs,
}

impl NormSet {
    /// Chooses the reference population by age.
    pub fn for_age(age: u8) -> Self {
        if age < UNIVERSITY_AGE_CUTOFF {
            NormSet::University
        } else {
            NormSet::Escs
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NormSet::University => "University",
            NormSet::Escs => "ESCS",
        }
    }
}

impl fmt::Display for NormSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A (mean, sd) entry for every aspect, indexed by [`Aspect::index`].
///
/// Serializes as a map keyed by aspect identifier. Deserialization rejects
/// tables that miss an aspect or carry a non-positive sd.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Aspect, NormEntry>",
    into = "BTreeMap<Aspect, NormEntry>"
)]
pub struct NormTable {
    entries: [NormEntry; 10],
}

impl NormTable {
    /// Builds a table from entries in canonical aspect order.
    pub const fn from_entries(entries: [NormEntry; 10]) -> Self {
        Self { entries }
    }

    pub fn get(&self, aspect: Aspect) -> NormEntry {
        self.entries[aspect.index()]
    }

    /// Iterates over (aspect, entry) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Aspect, NormEntry)> + '_ {
        Aspect::ALL.into_iter().map(move |aspect| (aspect, self.get(aspect)))
    }

    /// Returns a copy with one aspect's mean shifted.
    pub fn with_mean_shift(mut self, aspect: Aspect, shift: f64) -> Self {
        self.entries[aspect.index()].mean += shift;
        self
    }
}

impl TryFrom<BTreeMap<Aspect, NormEntry>> for NormTable {
    type Error = ValidationError;

    fn try_from(map: BTreeMap<Aspect, NormEntry>) -> Result<Self, Self::Error> {
        let mut entries = [NormEntry::new(0.0, 0.0); 10];
        for aspect in Aspect::ALL {
            let entry = map.get(&aspect).copied().ok_or_else(|| {
                ValidationError::invalid_format("norms", format!("missing entry for {}", aspect))
            })?;
            if !entry.mean.is_finite() || !entry.sd.is_finite() || entry.sd <= 0.0 {
                return Err(ValidationError::invalid_format(
                    "norms",
                    format!("{} needs a finite mean and positive sd", aspect),
                ));
            }
            entries[aspect.index()] = entry;
        }
        Ok(Self { entries })
    }
}

impl From<NormTable> for BTreeMap<Aspect, NormEntry> {
    fn from(table: NormTable) -> Self {
        table.iter().collect()
    }
}

/// ESCS community norms (N=481, ages 20-85, M=52.5).
pub const ESCS_NORMS: NormTable = NormTable::from_entries([
    NormEntry::new(3.74, 0.61), // openness
    NormEntry::new(3.70, 0.68), // intellect
    NormEntry::new(3.80, 0.61), // industriousness
    NormEntry::new(3.73, 0.62), // orderliness
    NormEntry::new(3.59, 0.72), // enthusiasm
    NormEntry::new(3.36, 0.70), // assertiveness
    NormEntry::new(4.11, 0.54), // compassion
    NormEntry::new(4.10, 0.53), // politeness
    NormEntry::new(2.45, 0.71), // withdrawal
    NormEntry::new(2.48, 0.70), // volatility
]);

/// University norms (N=480, ages 17-61, M=19.3).
pub const UNIVERSITY_NORMS: NormTable = NormTable::from_entries([
    NormEntry::new(3.52, 0.64), // openness
    NormEntry::new(3.39, 0.67), // intellect
    NormEntry::new(2.84, 0.70), // industriousness
    NormEntry::new(3.28, 0.64), // orderliness
    NormEntry::new(3.52, 0.73), // enthusiasm
    NormEntry::new(3.21, 0.71), // assertiveness
    NormEntry::new(3.87, 0.65), // compassion
    NormEntry::new(3.52, 0.67), // politeness
    NormEntry::new(2.92, 0.75), // withdrawal
    NormEntry::new(2.72, 0.82), // volatility
]);

/// Errors loading norm tables from configuration.
#[derive(Debug, Error)]
pub enum NormTableError {
    #[error("Failed to read norm table file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse norm tables: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Both reference tables used by norm selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormTables {
    #[serde(rename = "ESCS")]
    pub escs: NormTable,
    #[serde(rename = "University")]
    pub university: NormTable,
}

impl NormTables {
    /// The published constants.
    pub fn builtin() -> Self {
        Self {
            escs: ESCS_NORMS,
            university: UNIVERSITY_NORMS,
        }
    }

    /// Parses tables from YAML shaped like `ESCS: { openness: { mean, sd }, ... }`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NormTableError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML norm table file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, NormTableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn table(&self, set: NormSet) -> &NormTable {
        match set {
            NormSet::University => &self.university,
            NormSet::Escs => &self.escs,
        }
    }
}

impl Default for NormTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Norms selected for one respondent.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedNorms {
    pub norms: NormTable,
    pub norm_set: NormSet,
    /// True when the female mean shifts were applied.
    pub female_adjusted: bool,
}

impl SelectedNorms {
    /// Returns true if this aspect's norm was shifted for this respondent.
    pub fn is_adjusted(&self, aspect: Aspect) -> bool {
        self.female_adjusted && female_adjustment(aspect).is_some()
    }
}

/// Selects norms from the published tables.
pub fn select_norms(demographics: &Demographics) -> SelectedNorms {
    select_norms_from(&NormTables::builtin(), demographics)
}

/// Selects norms from explicit tables.
///
/// Only the three adjusted aspects differ between female and other
/// respondents; the source tables are never modified.
pub fn select_norms_from(tables: &NormTables, demographics: &Demographics) -> SelectedNorms {
    let norm_set = NormSet::for_age(demographics.age());
    let mut norms = *tables.table(norm_set);
    let female_adjusted = demographics.is_female();

    if female_adjusted {
        for (aspect, shift) in FEMALE_ADJUSTMENTS {
            norms = norms.with_mean_shift(aspect, shift);
        }
    }

    SelectedNorms {
        norms,
        norm_set,
        female_adjusted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn demographics(age: i64, gender: Option<&str>) -> Demographics {
        Demographics::new(age, gender).unwrap()
    }

    #[test]
    fn age_24_selects_university() {
        let selected = select_norms(&demographics(24, None));
        assert_eq!(selected.norm_set, NormSet::University);
        assert_eq!(selected.norms, UNIVERSITY_NORMS);
    }

    #[test]
    fn age_25_selects_escs() {
        let selected = select_norms(&demographics(25, None));
        assert_eq!(selected.norm_set, NormSet::Escs);
        assert_eq!(selected.norms, ESCS_NORMS);
    }

    #[test]
    fn female_shift_applies_to_three_aspects_only() {
        let adjusted = select_norms(&demographics(30, Some("female")));
        let plain = select_norms(&demographics(30, None));

        assert!(adjusted.female_adjusted);
        for aspect in Aspect::ALL {
            let expected = match female_adjustment(aspect) {
                Some(shift) => ESCS_NORMS.get(aspect).mean + shift,
                None => ESCS_NORMS.get(aspect).mean,
            };
            assert_eq!(adjusted.norms.get(aspect).mean, expected);
            assert_eq!(adjusted.norms.get(aspect).sd, plain.norms.get(aspect).sd);
        }
        assert_eq!(
            adjusted.norms.get(Aspect::Compassion).mean,
            plain.norms.get(Aspect::Compassion).mean + 0.24
        );
        assert_eq!(
            adjusted.norms.get(Aspect::Volatility),
            plain.norms.get(Aspect::Volatility)
        );
    }

    #[test]
    fn male_and_unspecified_are_unadjusted() {
        for gender in [None, Some("male"), Some("Man"), Some("manlig")] {
            let selected = select_norms(&demographics(20, gender));
            assert!(!selected.female_adjusted);
            assert_eq!(selected.norms, UNIVERSITY_NORMS);
        }
    }

    #[test]
    fn selection_leaves_constants_untouched() {
        let before = ESCS_NORMS;
        let first = select_norms(&demographics(40, Some("woman")));
        let second = select_norms(&demographics(40, Some("woman")));
        assert_eq!(first, second);
        assert_eq!(ESCS_NORMS, before);
        assert_eq!(NormTables::builtin().escs, before);
    }

    #[test]
    fn is_adjusted_requires_female_and_adjusted_aspect() {
        let female = select_norms(&demographics(30, Some("kvinna")));
        assert!(female.is_adjusted(Aspect::Withdrawal));
        assert!(!female.is_adjusted(Aspect::Volatility));

        let male = select_norms(&demographics(30, Some("male")));
        assert!(!male.is_adjusted(Aspect::Withdrawal));
    }

    #[test]
    fn norm_table_yaml_round_trip_preserves_values() {
        let yaml = serde_yaml::to_string(&NormTables::builtin()).unwrap();
        assert!(yaml.contains("ESCS"));
        assert!(yaml.contains("volatility"));
        let parsed = NormTables::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, NormTables::builtin());
    }

    #[test]
    fn norm_table_rejects_missing_aspect() {
        let mut map: BTreeMap<Aspect, NormEntry> = ESCS_NORMS.into();
        map.remove(&Aspect::Politeness);
        let err = NormTable::try_from(map).unwrap_err();
        assert!(err.to_string().contains("politeness"));
    }

    #[test]
    fn norm_table_rejects_zero_sd() {
        let mut map: BTreeMap<Aspect, NormEntry> = ESCS_NORMS.into();
        map.insert(Aspect::Openness, NormEntry::new(3.0, 0.0));
        assert!(NormTable::try_from(map).is_err());
    }

    #[test]
    fn from_yaml_file_reads_tables() {
        let yaml = serde_yaml::to_string(&NormTables::builtin()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let tables = NormTables::from_yaml_file(file.path()).unwrap();
        assert_eq!(tables.university, UNIVERSITY_NORMS);
    }

    #[test]
    fn from_yaml_file_reports_missing_file() {
        let err = NormTables::from_yaml_file("/nonexistent/norms.yaml").unwrap_err();
        assert!(matches!(err, NormTableError::Io(_)));
    }

    #[test]
    fn select_norms_from_uses_supplied_tables() {
        let mut tables = NormTables::builtin();
        tables.escs = tables.escs.with_mean_shift(Aspect::Openness, 1.0);
        let selected = select_norms_from(&tables, &demographics(50, None));
        assert!((selected.norms.get(Aspect::Openness).mean - 4.74).abs() < 1e-9);
    }

    #[test]
    fn norm_set_serializes_with_published_labels() {
        assert_eq!(serde_json::to_string(&NormSet::Escs).unwrap(), "\"ESCS\"");
        assert_eq!(serde_json::to_string(&NormSet::University).unwrap(), "\"University\"");
    }
}
