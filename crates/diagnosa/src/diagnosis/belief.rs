use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Damage, DamageCode};
use super::mass::MassFunction;

pub const HIGH_CONFIDENCE: f64 = 0.70;
pub const MEDIUM_CONFIDENCE: f64 = 0.40;

/// Qualitative label derived from a belief value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn classify(belief: f64) -> Self {
        if belief >= HIGH_CONFIDENCE {
            Self::High
        } else if belief >= MEDIUM_CONFIDENCE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Belief interval for one damage hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefInterval {
    pub code: DamageCode,
    pub belief: f64,
    pub plausibility: f64,
    pub uncertainty: f64,
}

impl BeliefInterval {
    pub fn confidence(&self) -> ConfidenceLevel {
        ConfidenceLevel::classify(self.belief)
    }
}

/// Score every catalog damage against the combined evidence, in catalog order.
///
/// All foci are singletons or the universal set, so belief is the mass committed to
/// the code and plausibility adds the shared uncertainty.
pub fn evaluate_beliefs(combined: &MassFunction, damages: &[Damage]) -> Vec<BeliefInterval> {
    damages
        .iter()
        .map(|damage| {
            let belief = combined.mass(&damage.code);
            BeliefInterval {
                code: damage.code.clone(),
                belief,
                plausibility: belief + combined.uncertainty,
                uncertainty: combined.uncertainty,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(ConfidenceLevel::classify(0.70), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::classify(0.6999), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::classify(0.40), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::classify(0.39), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::classify(0.0), ConfidenceLevel::Low);
    }
}
