//! Clinical Flag Engine - static threshold rules over aspect percentiles.
//!
//! Each rule is data: a pattern identifier, severity, the percentile
//! conditions that must all hold, and fixed message text. Rules never look
//! at each other's outcome, so any subset may fire.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::aspect::Aspect;
use super::scorer::{AspectScores, PercentileMap};

/// Inclusive lower bound for an "elevated" aspect.
pub const ELEVATED: u8 = 75;

/// Inclusive upper bound for a "low" aspect.
pub const LOW: u8 = 25;

/// Inclusive upper bound for drive in the perfectionism pattern.
pub const LOW_DRIVE: u8 = 40;

/// How urgently a fired pattern warrants follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Research-associated percentile patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalPattern {
    MaxDysregulation,
    AggressionRisk,
    DepressionSuicideRisk,
    #[serde(rename = "impulsive_selfharm")]
    ImpulsiveSelfHarm,
    PsychosisProneness,
    HypomaniaRisk,
    PerfectionismParalysis,
}

impl ClinicalPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicalPattern::MaxDysregulation => "max_dysregulation",
            ClinicalPattern::AggressionRisk => "aggression_risk",
            ClinicalPattern::DepressionSuicideRisk => "depression_suicide_risk",
            ClinicalPattern::ImpulsiveSelfHarm => "impulsive_selfharm",
            ClinicalPattern::PsychosisProneness => "psychosis_proneness",
            ClinicalPattern::HypomaniaRisk => "hypomania_risk",
            ClinicalPattern::PerfectionismParalysis => "perfectionism_paralysis",
        }
    }
}

impl fmt::Display for ClinicalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentile bound, inclusive on the stated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    AtLeast(u8),
    AtMost(u8),
}

impl Threshold {
    pub fn admits(&self, percentile: u8) -> bool {
        match *self {
            Threshold::AtLeast(bound) => percentile >= bound,
            Threshold::AtMost(bound) => percentile <= bound,
        }
    }
}

/// One aspect-level clause of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub aspect: Aspect,
    pub threshold: Threshold,
}

const fn at_least(aspect: Aspect, bound: u8) -> Condition {
    Condition {
        aspect,
        threshold: Threshold::AtLeast(bound),
    }
}

const fn at_most(aspect: Aspect, bound: u8) -> Condition {
    Condition {
        aspect,
        threshold: Threshold::AtMost(bound),
    }
}

/// A static rule that emits one flag when all its conditions hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicalRule {
    pub pattern: ClinicalPattern,
    pub severity: Severity,
    pub conditions: &'static [Condition],
    pub message: &'static str,
    pub recommendation: &'static str,
}

impl ClinicalRule {
    /// Returns true if every condition holds.
    pub fn matches(&self, percentiles: &PercentileMap) -> bool {
        self.conditions
            .iter()
            .all(|c| c.threshold.admits(percentiles.get(c.aspect).value()))
    }

    /// Aspects implicated by this rule, in condition order.
    pub fn aspects(&self) -> Vec<Aspect> {
        self.conditions.iter().map(|c| c.aspect).collect()
    }

    /// Evaluates the rule, producing a flag if it fires.
    pub fn evaluate(&self, percentiles: &PercentileMap) -> Option<ClinicalFlag> {
        self.matches(percentiles).then(|| ClinicalFlag {
            pattern: self.pattern,
            severity: self.severity,
            aspects_involved: self.aspects(),
            message: self.message.to_string(),
            recommendation: self.recommendation.to_string(),
        })
    }
}

/// The rule table, in output order.
pub const CLINICAL_RULES: &[ClinicalRule] = &[
    ClinicalRule {
        pattern: ClinicalPattern::MaxDysregulation,
        severity: Severity::High,
        conditions: &[
            at_least(Aspect::Volatility, ELEVATED),
            at_least(Aspect::Withdrawal, ELEVATED),
        ],
        message: "Combined internalizing and externalizing distress pattern",
        recommendation: "Priority for clinical evaluation. Highest psychopathology risk.",
    },
    ClinicalRule {
        pattern: ClinicalPattern::AggressionRisk,
        severity: Severity::High,
        conditions: &[
            at_least(Aspect::Volatility, ELEVATED),
            at_most(Aspect::Politeness, LOW),
            at_most(Aspect::Compassion, LOW),
        ],
        message: "Reactive aggression combined with antagonism",
        recommendation: "Screen for ASPD/NPD. Consider anger management.",
    },
    ClinicalRule {
        pattern: ClinicalPattern::DepressionSuicideRisk,
        severity: Severity::High,
        conditions: &[
            at_least(Aspect::Withdrawal, ELEVATED),
            at_most(Aspect::Enthusiasm, LOW),
            at_most(Aspect::Assertiveness, LOW),
        ],
        message: "Passive avoidance + anhedonia + low agency pattern",
        recommendation: "Depression screening and safety planning indicated.",
    },
    ClinicalRule {
        pattern: ClinicalPattern::ImpulsiveSelfHarm,
        severity: Severity::High,
        conditions: &[
            at_most(Aspect::Industriousness, LOW),
            at_most(Aspect::Orderliness, LOW),
            at_least(Aspect::Volatility, ELEVATED),
        ],
        message: "Impulsivity combined with emotional dysregulation",
        recommendation: "Safety planning priority. Consider DBT.",
    },
    ClinicalRule {
        pattern: ClinicalPattern::PsychosisProneness,
        severity: Severity::Medium,
        conditions: &[
            at_least(Aspect::Openness, ELEVATED),
            at_most(Aspect::Intellect, LOW),
            at_least(Aspect::Volatility, ELEVATED),
        ],
        message: "Pattern detection without critical evaluation plus dysregulation",
        recommendation: "Screen for schizotypal features. Not diagnostic.",
    },
    ClinicalRule {
        pattern: ClinicalPattern::HypomaniaRisk,
        severity: Severity::Medium,
        conditions: &[
            at_least(Aspect::Assertiveness, ELEVATED),
            at_least(Aspect::Volatility, ELEVATED),
            at_most(Aspect::Withdrawal, LOW),
        ],
        message: "Elevated hypomania risk pattern",
        recommendation: "Consider bipolar spectrum screening.",
    },
    ClinicalRule {
        pattern: ClinicalPattern::PerfectionismParalysis,
        severity: Severity::Low,
        conditions: &[
            at_least(Aspect::Orderliness, ELEVATED),
            at_most(Aspect::Industriousness, LOW_DRIVE),
        ],
        message: "High organization without matching drive",
        recommendation:
            "May indicate anxiety-driven perfectionism. Explore barriers to sustained effort.",
    },
];

/// A fired rule instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalFlag {
    pub pattern: ClinicalPattern,
    pub severity: Severity,
    pub aspects_involved: Vec<Aspect>,
    pub message: String,
    pub recommendation: String,
}

/// Runs every rule against the profile's percentiles.
pub fn detect_clinical_patterns(scores: &AspectScores) -> Vec<ClinicalFlag> {
    flags_from_percentiles(&scores.percentiles())
}

/// Runs every rule independently, keeping table order.
pub fn flags_from_percentiles(percentiles: &PercentileMap) -> Vec<ClinicalFlag> {
    CLINICAL_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(percentiles))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: ClinicalPattern) -> &'static ClinicalRule {
        CLINICAL_RULES
            .iter()
            .find(|r| r.pattern == pattern)
            .unwrap()
    }

    fn patterns(percentiles: &PercentileMap) -> Vec<ClinicalPattern> {
        flags_from_percentiles(percentiles)
            .into_iter()
            .map(|f| f.pattern)
            .collect()
    }

    #[test]
    fn median_profile_fires_nothing() {
        assert!(flags_from_percentiles(&PercentileMap::uniform(50)).is_empty());
    }

    #[test]
    fn rule_table_has_seven_distinct_patterns() {
        assert_eq!(CLINICAL_RULES.len(), 7);
        for (i, a) in CLINICAL_RULES.iter().enumerate() {
            for b in &CLINICAL_RULES[i + 1..] {
                assert_ne!(a.pattern, b.pattern);
            }
        }
    }

    #[test]
    fn elevated_bound_is_inclusive_at_75() {
        let max = rule(ClinicalPattern::MaxDysregulation);
        let at_75 = PercentileMap::uniform(50)
            .with(Aspect::Volatility, 75)
            .with(Aspect::Withdrawal, 75);
        let at_74 = at_75.with(Aspect::Withdrawal, 74);

        assert!(max.matches(&at_75));
        assert!(!max.matches(&at_74));
    }

    #[test]
    fn low_bound_is_inclusive_at_25() {
        let aggression = rule(ClinicalPattern::AggressionRisk);
        let at_25 = PercentileMap::uniform(50)
            .with(Aspect::Volatility, 75)
            .with(Aspect::Politeness, 25)
            .with(Aspect::Compassion, 25);
        let at_26 = at_25.with(Aspect::Compassion, 26);

        assert!(aggression.matches(&at_25));
        assert!(!aggression.matches(&at_26));
    }

    #[test]
    fn depression_rule_needs_all_three_conditions() {
        let depression = rule(ClinicalPattern::DepressionSuicideRisk);
        let full = PercentileMap::uniform(50)
            .with(Aspect::Withdrawal, 80)
            .with(Aspect::Enthusiasm, 10)
            .with(Aspect::Assertiveness, 20);

        assert!(depression.matches(&full));
        assert!(!depression.matches(&full.with(Aspect::Assertiveness, 30)));
        assert!(!depression.matches(&full.with(Aspect::Withdrawal, 60)));
    }

    #[test]
    fn impulsive_selfharm_fires_on_low_conscientiousness_and_volatility() {
        let map = PercentileMap::uniform(50)
            .with(Aspect::Industriousness, 25)
            .with(Aspect::Orderliness, 10)
            .with(Aspect::Volatility, 90);
        assert_eq!(patterns(&map), vec![ClinicalPattern::ImpulsiveSelfHarm]);
    }

    #[test]
    fn psychosis_proneness_is_medium_severity() {
        let map = PercentileMap::uniform(50)
            .with(Aspect::Openness, 75)
            .with(Aspect::Intellect, 25)
            .with(Aspect::Volatility, 75);
        let flags = flags_from_percentiles(&map);

        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].pattern, ClinicalPattern::PsychosisProneness);
        assert_eq!(flags[0].severity, Severity::Medium);
        assert_eq!(
            flags[0].aspects_involved,
            vec![Aspect::Openness, Aspect::Intellect, Aspect::Volatility]
        );
    }

    #[test]
    fn hypomania_requires_low_withdrawal() {
        let map = PercentileMap::uniform(50)
            .with(Aspect::Assertiveness, 80)
            .with(Aspect::Volatility, 80)
            .with(Aspect::Withdrawal, 25);
        assert_eq!(patterns(&map), vec![ClinicalPattern::HypomaniaRisk]);
        assert!(patterns(&map.with(Aspect::Withdrawal, 26)).is_empty());
    }

    #[test]
    fn perfectionism_uses_drive_ceiling_of_40() {
        let perfectionism = rule(ClinicalPattern::PerfectionismParalysis);
        let map = PercentileMap::uniform(50)
            .with(Aspect::Orderliness, 75)
            .with(Aspect::Industriousness, 40);

        assert!(perfectionism.matches(&map));
        assert!(!perfectionism.matches(&map.with(Aspect::Industriousness, 41)));
        assert_eq!(perfectionism.severity, Severity::Low);
    }

    #[test]
    fn co_occurring_flags_keep_table_order() {
        let map = PercentileMap::uniform(50)
            .with(Aspect::Volatility, 90)
            .with(Aspect::Withdrawal, 90)
            .with(Aspect::Politeness, 10)
            .with(Aspect::Compassion, 10)
            .with(Aspect::Enthusiasm, 10)
            .with(Aspect::Assertiveness, 10)
            .with(Aspect::Industriousness, 10)
            .with(Aspect::Orderliness, 10);

        assert_eq!(
            patterns(&map),
            vec![
                ClinicalPattern::MaxDysregulation,
                ClinicalPattern::AggressionRisk,
                ClinicalPattern::DepressionSuicideRisk,
                ClinicalPattern::ImpulsiveSelfHarm,
            ]
        );
    }

    #[test]
    fn flag_carries_fixed_text() {
        let map = PercentileMap::uniform(50)
            .with(Aspect::Volatility, 75)
            .with(Aspect::Withdrawal, 75);
        let flag = &flags_from_percentiles(&map)[0];

        assert_eq!(flag.severity, Severity::High);
        assert_eq!(flag.aspects_involved, vec![Aspect::Volatility, Aspect::Withdrawal]);
        assert_eq!(flag.message, "Combined internalizing and externalizing distress pattern");
        assert!(flag.recommendation.starts_with("Priority for clinical evaluation"));
    }

    #[test]
    fn pattern_identifiers_serialize_as_published() {
        assert_eq!(
            serde_json::to_string(&ClinicalPattern::ImpulsiveSelfHarm).unwrap(),
            "\"impulsive_selfharm\""
        );
        assert_eq!(
            serde_json::to_string(&ClinicalPattern::DepressionSuicideRisk).unwrap(),
            "\"depression_suicide_risk\""
        );
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
        for rule in CLINICAL_RULES {
            let json = serde_json::to_string(&rule.pattern).unwrap();
            assert_eq!(json, format!("\"{}\"", rule.pattern.as_str()));
        }
    }
}
