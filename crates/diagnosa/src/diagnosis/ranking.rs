use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::belief::{BeliefInterval, ConfidenceLevel};
use super::domain::{Damage, DamageCode, SeverityTier, Symptom, SymptomCode};
use super::error::DataIntegrityError;
use super::mass::MassFunction;

/// A selected symptom paired with its normalized mass function.
#[derive(Debug, Clone)]
pub struct SymptomEvidence<'a> {
    pub symptom: &'a Symptom,
    pub mass: MassFunction,
}

/// Ranked hypothesis with catalog metadata attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisResult {
    pub code: DamageCode,
    pub name: String,
    pub description: String,
    pub severity: SeverityTier,
    pub cost_estimate: String,
    pub time_estimate: String,
    pub prior_probability: f64,
    pub solution: String,
    pub belief: f64,
    pub plausibility: f64,
    pub uncertainty: f64,
    pub confidence: ConfidenceLevel,
    pub contributing_symptoms: Vec<SymptomCode>,
}

/// Headline figures for the caller's result card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisSummary {
    /// Belief of the top result as a percentage, two decimals.
    pub accuracy_percent: f64,
    pub dominant_category: Option<String>,
    pub severity: Option<SeverityTier>,
    pub combined_uncertainty: f64,
    pub symptom_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport {
    pub results: Vec<DiagnosisResult>,
    pub summary: DiagnosisSummary,
    pub mass_assignments: MassFunction,
    pub warnings: Vec<DataIntegrityError>,
}

impl DiagnosisReport {
    pub fn top(&self) -> Option<&DiagnosisResult> {
        self.results.first()
    }
}

/// Skip mass assigned to damages missing from the catalog.
///
/// The skipped mass moves onto each symptom's uncertainty before combination. One
/// warning per (selected symptom, missing damage) pair, in selection order.
pub fn skip_dangling_references(
    evidence: &mut [SymptomEvidence<'_>],
    damages: &[Damage],
) -> Vec<DataIntegrityError> {
    let known: BTreeSet<&DamageCode> = damages.iter().map(|damage| &damage.code).collect();

    let mut warnings = Vec::new();
    for item in evidence.iter_mut() {
        for code in item.mass.discard_foci(|code| known.contains(code)) {
            warnings.push(DataIntegrityError {
                symptom: item.symptom.code.clone(),
                damage: code,
            });
        }
    }
    warnings
}

/// Sort by belief descending, then code ascending, and keep at most `top_n`.
pub fn rank(
    intervals: Vec<BeliefInterval>,
    damages: &[Damage],
    evidence: &[SymptomEvidence<'_>],
    top_n: Option<usize>,
) -> Vec<DiagnosisResult> {
    let by_code: HashMap<&DamageCode, &Damage> =
        damages.iter().map(|damage| (&damage.code, damage)).collect();

    let mut results: Vec<DiagnosisResult> = intervals
        .into_iter()
        .filter_map(|interval| {
            let damage = by_code.get(&interval.code)?;
            let contributing_symptoms = evidence
                .iter()
                .filter(|item| item.mass.mass(&interval.code) > 0.0)
                .map(|item| item.symptom.code.clone())
                .collect();

            Some(DiagnosisResult {
                code: interval.code.clone(),
                name: damage.name.clone(),
                description: damage.description.clone(),
                severity: damage.severity,
                cost_estimate: damage.cost_estimate.clone(),
                time_estimate: damage.time_estimate.clone(),
                prior_probability: damage.prior_probability,
                solution: damage.solution.clone(),
                confidence: interval.confidence(),
                belief: interval.belief,
                plausibility: interval.plausibility,
                uncertainty: interval.uncertainty,
                contributing_symptoms,
            })
        })
        .collect();

    results.sort_by(|left, right| {
        right
            .belief
            .total_cmp(&left.belief)
            .then_with(|| left.code.cmp(&right.code))
    });

    if let Some(limit) = top_n {
        results.truncate(limit);
    }

    results
}

pub fn summarize(
    results: &[DiagnosisResult],
    evidence: &[SymptomEvidence<'_>],
    combined: &MassFunction,
) -> DiagnosisSummary {
    let top = results.first();

    let accuracy_percent = top
        .map(|result| (result.belief * 10_000.0).round() / 100.0)
        .unwrap_or(0.0);

    let severity = top
        .filter(|result| result.belief > 0.0)
        .map(|result| result.severity);

    let contributors: Vec<&Symptom> = match top {
        Some(result) if !result.contributing_symptoms.is_empty() => evidence
            .iter()
            .filter(|item| result.contributing_symptoms.contains(&item.symptom.code))
            .map(|item| item.symptom)
            .collect(),
        _ => evidence.iter().map(|item| item.symptom).collect(),
    };

    DiagnosisSummary {
        accuracy_percent,
        dominant_category: dominant_category(&contributors),
        severity,
        combined_uncertainty: combined.uncertainty,
        symptom_count: evidence.len(),
    }
}

/// Most frequent category; the earliest selected wins a tie.
fn dominant_category(symptoms: &[&Symptom]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for symptom in symptoms {
        let category = symptom.category.as_str();
        match counts.iter().position(|(seen, _)| *seen == category) {
            Some(index) => counts[index].1 += 1,
            None => counts.push((category, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (category, count) in counts {
        if best.map(|(_, top)| count > top).unwrap_or(true) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category.to_string())
}
