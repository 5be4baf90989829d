use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{DamageCode, Symptom};
use super::error::ValidationError;

/// Minimum uncertainty every symptom keeps, so no single symptom claims certainty.
pub const UNCERTAINTY_FLOOR: f64 = 0.05;

/// Tolerance when checking that a mass function sums to one.
pub const MASS_EPSILON: f64 = 1e-9;

/// Mass over singleton damage foci plus the universal (uncertainty) set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassFunction {
    pub assignments: BTreeMap<DamageCode, f64>,
    pub uncertainty: f64,
}

impl MassFunction {
    /// Total ignorance: all mass on the universal set.
    pub fn vacuous() -> Self {
        Self {
            assignments: BTreeMap::new(),
            uncertainty: 1.0,
        }
    }

    pub fn mass(&self, code: &DamageCode) -> f64 {
        self.assignments.get(code).copied().unwrap_or(0.0)
    }

    pub fn assigned_total(&self) -> f64 {
        self.assignments.values().sum()
    }

    pub fn total(&self) -> f64 {
        self.assigned_total() + self.uncertainty
    }

    pub fn focal_codes(&self) -> impl Iterator<Item = &DamageCode> {
        self.assignments.keys()
    }

    /// Drop foci rejected by `keep`, moving their mass onto the universal set.
    ///
    /// The total is unchanged. Returns the dropped codes in code order.
    pub fn discard_foci<F>(&mut self, mut keep: F) -> Vec<DamageCode>
    where
        F: FnMut(&DamageCode) -> bool,
    {
        let mut moved = 0.0;
        let mut dropped = Vec::new();
        self.assignments.retain(|code, mass| {
            if keep(code) {
                return true;
            }
            moved += *mass;
            dropped.push(code.clone());
            false
        });
        self.uncertainty += moved;
        dropped
    }
}

/// Normalize a symptom's stored mass function.
///
/// Non-positive entries are dropped. Uncertainty becomes
/// `max(supplied, UNCERTAINTY_FLOOR, 1 - assigned)` and is never lowered. A total
/// above one is rejected rather than rescaled.
pub fn normalize(symptom: &Symptom) -> Result<MassFunction, ValidationError> {
    let malformed = |total: f64| ValidationError::MalformedMassFunction {
        symptom: symptom.code.clone(),
        total,
    };

    let mut assignments = BTreeMap::new();
    for (code, mass) in &symptom.mass_function {
        if !mass.is_finite() {
            return Err(malformed(*mass));
        }
        if *mass > 0.0 {
            assignments.insert(code.clone(), *mass);
        }
    }

    let assigned: f64 = assignments.values().sum();
    let computed = UNCERTAINTY_FLOOR.max(1.0 - assigned);
    let uncertainty = match symptom.uncertainty {
        Some(supplied) if !supplied.is_finite() => return Err(malformed(supplied)),
        Some(supplied) => supplied.max(computed),
        None => computed,
    };

    let total = assigned + uncertainty;
    if total > 1.0 + MASS_EPSILON {
        return Err(malformed(total));
    }

    Ok(MassFunction {
        assignments,
        uncertainty,
    })
}
