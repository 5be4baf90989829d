use serde::{Deserialize, Serialize};

use super::domain::{DamageCode, SymptomCode};

/// Failure that aborts a diagnosis. No partial report is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiagnosisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

impl DiagnosisError {
    pub fn kind(&self) -> &'static str {
        match self {
            DiagnosisError::Validation(_) => "validation",
            DiagnosisError::Conflict(_) => "conflict",
        }
    }
}

/// Bad input shape: selection bounds, unknown codes, or malformed catalog entries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one symptom must be selected")]
    EmptySelection,
    #[error("{selected} symptoms selected, at most {max} are allowed")]
    TooManySymptoms { selected: usize, max: usize },
    #[error("symptom {0} was selected more than once")]
    DuplicateSymptom(SymptomCode),
    #[error("symptom {0} is not in the catalog")]
    UnknownSymptom(SymptomCode),
    #[error("symptom {symptom} does not apply to device type '{device_type}'")]
    SymptomNotApplicable {
        symptom: SymptomCode,
        device_type: String,
    },
    #[error("mass function of symptom {symptom} is malformed (total mass {total:.6})")]
    MalformedMassFunction { symptom: SymptomCode, total: f64 },
    #[error("invalid diagnosis option: {0}")]
    InvalidOption(&'static str),
    #[error("catalog lists symptom {0} more than once")]
    DuplicateCatalogSymptom(SymptomCode),
    #[error("catalog lists damage {0} more than once")]
    DuplicateCatalogDamage(DamageCode),
}

/// Selected evidence is totally contradictory; no normalization is possible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("evidence is fully contradictory (conflict mass {conflict:.9})")]
pub struct ConflictError {
    pub conflict: f64,
}

/// A symptom points at a damage code the catalog no longer holds.
///
/// Reported as a warning on the report; the computation continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("symptom {symptom} references unknown damage {damage}")]
pub struct DataIntegrityError {
    pub symptom: SymptomCode,
    pub damage: DamageCode,
}
