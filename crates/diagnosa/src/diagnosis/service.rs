use std::sync::Arc;

use tracing::{info, warn};

use super::catalog::{CatalogError, CatalogSnapshot, CatalogSource};
use super::domain::{Damage, DiagnosisRequest, Symptom};
use super::engine::{DiagnosisEngine, DiagnosisOptions};
use super::error::DiagnosisError;
use super::ranking::DiagnosisReport;

/// Service composing a catalog source with the diagnosis engine.
pub struct DiagnosisService<C> {
    catalog: Arc<C>,
    engine: Arc<DiagnosisEngine>,
}

impl<C> DiagnosisService<C>
where
    C: CatalogSource + 'static,
{
    pub fn new(catalog: Arc<C>, options: DiagnosisOptions) -> Self {
        Self {
            catalog,
            engine: Arc::new(DiagnosisEngine::new(options)),
        }
    }

    /// Snapshot the catalog and run one diagnosis against it.
    pub fn diagnose(
        &self,
        request: &DiagnosisRequest,
    ) -> Result<DiagnosisReport, DiagnosisServiceError> {
        let snapshot = CatalogSnapshot::from_source(self.catalog.as_ref())?;

        let report = match self.engine.diagnose(request, &snapshot) {
            Ok(report) => report,
            Err(err) => {
                warn!(
                    kind = err.kind(),
                    symptoms = request.symptoms.len(),
                    error = %err,
                    "diagnosis rejected"
                );
                return Err(err.into());
            }
        };

        for warning in &report.warnings {
            warn!(
                symptom = %warning.symptom,
                damage = %warning.damage,
                "symptom references a damage missing from the catalog"
            );
        }

        match report.top() {
            Some(top) => info!(
                symptoms = request.symptoms.len(),
                top = %top.code,
                belief = top.belief,
                confidence = top.confidence.label(),
                "diagnosis computed"
            ),
            None => info!(
                symptoms = request.symptoms.len(),
                "diagnosis computed against an empty damage catalog"
            ),
        }

        Ok(report)
    }

    /// Symptoms offered to the user, optionally narrowed to one device type.
    pub fn symptoms(
        &self,
        device_type: Option<&str>,
    ) -> Result<Vec<Symptom>, DiagnosisServiceError> {
        let mut symptoms = self.catalog.list_symptoms()?;
        if let Some(device_type) = device_type {
            symptoms.retain(|symptom| symptom.applies_to(device_type));
        }
        Ok(symptoms)
    }

    pub fn damages(&self) -> Result<Vec<Damage>, DiagnosisServiceError> {
        Ok(self.catalog.list_damages()?)
    }
}

/// Error raised by the diagnosis service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Diagnosis(#[from] DiagnosisError),
}
