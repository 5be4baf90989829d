//! Symptom-driven hardware diagnosis built on Dempster-Shafer evidence combination.
//!
//! Each selected symptom is normalized into a mass function over singleton damage codes
//! plus a universal uncertainty set, the mass functions are folded together with
//! Dempster's rule, and every catalog damage receives a belief interval before ranking.

pub mod belief;
pub mod catalog;
pub mod combine;
pub mod domain;
pub mod engine;
pub mod error;
pub mod mass;
pub mod ranking;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use belief::{evaluate_beliefs, BeliefInterval, ConfidenceLevel};
pub use catalog::{
    CatalogError, CatalogImportError, CatalogImporter, CatalogSnapshot, CatalogSource,
};
pub use combine::{combine, combine_all};
pub use domain::{Damage, DamageCode, DiagnosisRequest, SeverityTier, Symptom, SymptomCode};
pub use engine::{compute_diagnosis, DiagnosisEngine, DiagnosisOptions, DEFAULT_MAX_SYMPTOMS};
pub use error::{ConflictError, DataIntegrityError, DiagnosisError, ValidationError};
pub use mass::{normalize, MassFunction};
pub use ranking::{DiagnosisReport, DiagnosisResult, DiagnosisSummary};
pub use router::diagnosis_router;
pub use service::{DiagnosisService, DiagnosisServiceError};
