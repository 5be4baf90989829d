//! Symptom and damage catalogs consumed by the engine.
//!
//! The engine only needs in-memory collections; where they come from (a document store,
//! a JSON export, a pair of CSV sheets) is behind [`CatalogSource`].

mod import;
mod parser;
mod standard;

pub use import::{CatalogImportError, CatalogImporter};

use serde::{Deserialize, Serialize};

use super::domain::{Damage, DamageCode, Symptom, SymptomCode};

/// Read access to the symptom and damage catalogs.
pub trait CatalogSource: Send + Sync {
    fn list_symptoms(&self) -> Result<Vec<Symptom>, CatalogError>;
    fn list_damages(&self) -> Result<Vec<Damage>, CatalogError>;
}

/// Error enumeration for catalog source failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Immutable copy of both catalogs, taken once per diagnosis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    symptoms: Vec<Symptom>,
    #[serde(default)]
    damages: Vec<Damage>,
}

impl CatalogSnapshot {
    pub fn new(symptoms: Vec<Symptom>, damages: Vec<Damage>) -> Self {
        Self { symptoms, damages }
    }

    /// Built-in reference catalog of common PC hardware failures.
    pub fn standard() -> Self {
        Self::new(standard::symptoms(), standard::damages())
    }

    pub fn from_source<C: CatalogSource + ?Sized>(source: &C) -> Result<Self, CatalogError> {
        Ok(Self::new(source.list_symptoms()?, source.list_damages()?))
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn damages(&self) -> &[Damage] {
        &self.damages
    }

    pub fn symptom(&self, code: &SymptomCode) -> Option<&Symptom> {
        self.symptoms.iter().find(|symptom| &symptom.code == code)
    }

    pub fn damage(&self, code: &DamageCode) -> Option<&Damage> {
        self.damages.iter().find(|damage| &damage.code == code)
    }

    pub fn symptoms_for_device(&self, device_type: &str) -> Vec<&Symptom> {
        self.symptoms
            .iter()
            .filter(|symptom| symptom.applies_to(device_type))
            .collect()
    }
}

impl CatalogSource for CatalogSnapshot {
    fn list_symptoms(&self) -> Result<Vec<Symptom>, CatalogError> {
        Ok(self.symptoms.clone())
    }

    fn list_damages(&self) -> Result<Vec<Damage>, CatalogError> {
        Ok(self.damages.clone())
    }
}
