use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::belief::evaluate_beliefs;
use super::catalog::CatalogSnapshot;
use super::combine::combine_all;
use super::domain::{Damage, DiagnosisRequest, Symptom, SymptomCode};
use super::error::{DiagnosisError, ValidationError};
use super::mass::{normalize, MassFunction};
use super::ranking::{
    rank, skip_dangling_references, summarize, DiagnosisReport, SymptomEvidence,
};

pub const DEFAULT_MAX_SYMPTOMS: usize = 5;

/// Caller-tunable limits. The evidence math constants are not part of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisOptions {
    pub max_symptoms: usize,
    /// Keep only the first `top_n` ranked damages; `None` returns all of them.
    pub top_n: Option<usize>,
}

impl Default for DiagnosisOptions {
    fn default() -> Self {
        Self {
            max_symptoms: DEFAULT_MAX_SYMPTOMS,
            top_n: None,
        }
    }
}

/// Stateless engine that combines symptom evidence against a catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct DiagnosisEngine {
    options: DiagnosisOptions,
}

impl DiagnosisEngine {
    pub fn new(options: DiagnosisOptions) -> Self {
        Self { options }
    }

    /// Diagnose a request; the request's `top_n` takes precedence over the engine's.
    pub fn diagnose(
        &self,
        request: &DiagnosisRequest,
        catalog: &CatalogSnapshot,
    ) -> Result<DiagnosisReport, DiagnosisError> {
        let options = DiagnosisOptions {
            top_n: request.top_n.or(self.options.top_n),
            ..self.options
        };

        run(
            &request.symptoms,
            request.device_type.as_deref(),
            catalog.symptoms(),
            catalog.damages(),
            &options,
        )
    }
}

/// Function-call entry point over plain catalog slices.
///
/// Repeated symptom or damage codes in the slices are rejected.
pub fn compute_diagnosis(
    selected: &[SymptomCode],
    symptoms: &[Symptom],
    damages: &[Damage],
    options: &DiagnosisOptions,
) -> Result<DiagnosisReport, DiagnosisError> {
    run(selected, None, symptoms, damages, options)
}

fn run(
    selected: &[SymptomCode],
    device_type: Option<&str>,
    symptoms: &[Symptom],
    damages: &[Damage],
    options: &DiagnosisOptions,
) -> Result<DiagnosisReport, DiagnosisError> {
    let chosen = resolve_selection(selected, device_type, symptoms, options)?;
    ensure_unique_catalog(symptoms, damages)?;

    let mut evidence = chosen
        .into_iter()
        .map(|symptom| {
            normalize(symptom).map(|mass| SymptomEvidence { symptom, mass })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let warnings = skip_dangling_references(&mut evidence, damages);

    let masses: Vec<MassFunction> = evidence.iter().map(|item| item.mass.clone()).collect();
    let combined = combine_all(&masses)?;

    let intervals = evaluate_beliefs(&combined, damages);
    let results = rank(intervals, damages, &evidence, options.top_n);
    let summary = summarize(&results, &evidence, &combined);

    Ok(DiagnosisReport {
        results,
        summary,
        mass_assignments: combined,
        warnings,
    })
}

/// Catalog codes must be unique on both sides.
fn ensure_unique_catalog(symptoms: &[Symptom], damages: &[Damage]) -> Result<(), ValidationError> {
    let mut seen_symptoms = HashSet::new();
    if let Some(symptom) = symptoms
        .iter()
        .find(|symptom| !seen_symptoms.insert(&symptom.code))
    {
        return Err(ValidationError::DuplicateCatalogSymptom(symptom.code.clone()));
    }

    let mut seen_damages = HashSet::new();
    if let Some(damage) = damages
        .iter()
        .find(|damage| !seen_damages.insert(&damage.code))
    {
        return Err(ValidationError::DuplicateCatalogDamage(damage.code.clone()));
    }

    Ok(())
}

/// Check the selection against the options and catalog, keeping selection order.
fn resolve_selection<'a>(
    selected: &[SymptomCode],
    device_type: Option<&str>,
    symptoms: &'a [Symptom],
    options: &DiagnosisOptions,
) -> Result<Vec<&'a Symptom>, ValidationError> {
    if options.max_symptoms == 0 {
        return Err(ValidationError::InvalidOption(
            "max_symptoms must be at least 1",
        ));
    }
    if options.top_n == Some(0) {
        return Err(ValidationError::InvalidOption("top_n must be at least 1"));
    }
    if selected.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    if selected.len() > options.max_symptoms {
        return Err(ValidationError::TooManySymptoms {
            selected: selected.len(),
            max: options.max_symptoms,
        });
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = selected.iter().find(|code| !seen.insert(*code)) {
        return Err(ValidationError::DuplicateSymptom(duplicate.clone()));
    }

    let by_code: HashMap<&SymptomCode, &Symptom> = symptoms
        .iter()
        .map(|symptom| (&symptom.code, symptom))
        .collect();

    let mut chosen = Vec::with_capacity(selected.len());
    for code in selected {
        let symptom = by_code
            .get(code)
            .copied()
            .ok_or_else(|| ValidationError::UnknownSymptom(code.clone()))?;

        if let Some(device_type) = device_type {
            if !symptom.applies_to(device_type) {
                return Err(ValidationError::SymptomNotApplicable {
                    symptom: code.clone(),
                    device_type: device_type.to_string(),
                });
            }
        }

        chosen.push(symptom);
    }

    Ok(chosen)
}
