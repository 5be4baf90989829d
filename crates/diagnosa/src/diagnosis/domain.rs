use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable catalog identifier for a damage hypothesis (e.g. `KK3`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DamageCode(pub String);

/// Stable catalog identifier for a symptom (e.g. `G7`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomCode(pub String);

impl DamageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SymptomCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DamageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SymptomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DamageCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for SymptomCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Minor,
    Moderate,
    Severe,
}

impl SeverityTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    /// Accepts the labels administrators type into catalog exports.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minor" | "low" | "ringan" => Some(Self::Minor),
            "moderate" | "medium" | "sedang" => Some(Self::Moderate),
            "severe" | "high" | "berat" => Some(Self::Severe),
            _ => None,
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A hardware failure the engine can rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub code: DamageCode,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub severity: SeverityTier,
    #[serde(default)]
    pub cost_estimate: String,
    #[serde(default)]
    pub time_estimate: String,
    /// Contextual weight in `(0, 0.5]`. Never part of the combination.
    pub prior_probability: f64,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub related_symptoms: Vec<SymptomCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An observable symptom and the belief it commits to individual damages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub code: SymptomCode,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Empty means the symptom applies to every device type.
    #[serde(default)]
    pub device_types: Vec<String>,
    pub mass_function: BTreeMap<DamageCode, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Symptom {
    pub fn applies_to(&self, device_type: &str) -> bool {
        self.device_types.is_empty()
            || self
                .device_types
                .iter()
                .any(|candidate| candidate.trim().eq_ignore_ascii_case(device_type.trim()))
    }
}

/// Per-interaction selection of symptoms submitted for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub symptoms: Vec<SymptomCode>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl DiagnosisRequest {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms
                .into_iter()
                .map(|code| SymptomCode(code.into()))
                .collect(),
            device_type: None,
            top_n: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parse_accepts_catalog_aliases() {
        assert_eq!(SeverityTier::parse("Berat"), Some(SeverityTier::Severe));
        assert_eq!(SeverityTier::parse(" moderate "), Some(SeverityTier::Moderate));
        assert_eq!(SeverityTier::parse("catastrophic"), None);
    }

    #[test]
    fn symptom_without_device_types_applies_everywhere() {
        let symptom = Symptom {
            code: SymptomCode::from("G1"),
            name: "No power".to_string(),
            description: String::new(),
            category: "power".to_string(),
            device_types: Vec::new(),
            mass_function: BTreeMap::new(),
            uncertainty: None,
            updated_at: None,
        };

        assert!(symptom.applies_to("laptop"));

        let desktop_only = Symptom {
            device_types: vec!["Desktop".to_string()],
            ..symptom
        };
        assert!(desktop_only.applies_to("desktop"));
        assert!(!desktop_only.applies_to("laptop"));
    }
}
