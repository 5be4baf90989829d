use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::diagnosis::catalog::{CatalogError, CatalogSnapshot, CatalogSource};
use crate::diagnosis::domain::{Damage, DamageCode, SeverityTier, Symptom, SymptomCode};
use crate::diagnosis::engine::DiagnosisOptions;
use crate::diagnosis::service::DiagnosisService;

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn damage(code: &str, name: &str, severity: SeverityTier, prior: f64) -> Damage {
    Damage {
        code: DamageCode::from(code),
        name: name.to_string(),
        description: format!("{name} detected"),
        severity,
        cost_estimate: "Rp 500.000".to_string(),
        time_estimate: "2 hours".to_string(),
        prior_probability: prior,
        solution: format!("Replace the component behind {name}"),
        related_symptoms: Vec::new(),
        updated_at: None,
    }
}

pub(super) fn symptom(
    code: &str,
    category: &str,
    masses: &[(&str, f64)],
    uncertainty: Option<f64>,
) -> Symptom {
    Symptom {
        code: SymptomCode::from(code),
        name: format!("Symptom {code}"),
        description: String::new(),
        category: category.to_string(),
        device_types: Vec::new(),
        mass_function: masses
            .iter()
            .map(|(damage, mass)| (DamageCode::from(*damage), *mass))
            .collect::<BTreeMap<_, _>>(),
        uncertainty,
        updated_at: None,
    }
}

pub(super) fn codes(values: &[&str]) -> Vec<SymptomCode> {
    values.iter().map(|value| SymptomCode::from(*value)).collect()
}

/// Two damages and the two symptoms of the worked PSU/RAM example, plus four
/// weak symptoms for selection-bound checks.
pub(super) fn example_catalog() -> CatalogSnapshot {
    let mut laptop_only = symptom("G7", "input", &[("KK2", 0.1)], None);
    laptop_only.device_types = vec!["laptop".to_string()];

    CatalogSnapshot::new(
        vec![
            symptom("G1", "power", &[("KK1", 0.6)], None),
            symptom("G2", "memory", &[("KK1", 0.3), ("KK2", 0.2)], None),
            symptom("G3", "memory", &[("KK2", 0.1)], None),
            symptom("G4", "power", &[("KK1", 0.1)], None),
            symptom("G5", "memory", &[("KK2", 0.15)], None),
            symptom("G6", "power", &[("KK1", 0.05)], None),
            laptop_only,
        ],
        vec![
            damage("KK1", "PSU Failure", SeverityTier::Severe, 0.2),
            damage("KK2", "RAM Failure", SeverityTier::Moderate, 0.15),
        ],
    )
}

pub(super) fn example_symptoms() -> Vec<Symptom> {
    example_catalog().symptoms().to_vec()
}

pub(super) fn example_damages() -> Vec<Damage> {
    example_catalog().damages().to_vec()
}

pub(super) fn build_service() -> Arc<DiagnosisService<CatalogSnapshot>> {
    Arc::new(DiagnosisService::new(
        Arc::new(example_catalog()),
        DiagnosisOptions::default(),
    ))
}

pub(super) struct UnavailableCatalog;

impl CatalogSource for UnavailableCatalog {
    fn list_symptoms(&self) -> Result<Vec<Symptom>, CatalogError> {
        Err(CatalogError::Unavailable("document store offline".to_string()))
    }

    fn list_damages(&self) -> Result<Vec<Damage>, CatalogError> {
        Err(CatalogError::Unavailable("document store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
