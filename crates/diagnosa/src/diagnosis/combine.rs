use std::collections::BTreeMap;

use super::error::{ConflictError, DiagnosisError, ValidationError};
use super::mass::MassFunction;

/// Below this normalization denominator the evidence is treated as fully contradictory.
pub const CONFLICT_TOLERANCE: f64 = 1e-9;

/// Dempster's rule for two singleton-focused mass functions.
///
/// Equal singletons reinforce each other, a singleton meeting the universal set keeps
/// the singleton, and distinct singletons land on the empty set (conflict `K`). The
/// surviving mass is renormalized by `1 - K`.
pub fn combine(left: &MassFunction, right: &MassFunction) -> Result<MassFunction, ConflictError> {
    let mut raw: BTreeMap<_, f64> = BTreeMap::new();
    let mut conflict = 0.0;

    for (a, mass_a) in &left.assignments {
        for (b, mass_b) in &right.assignments {
            let product = mass_a * mass_b;
            if a == b {
                *raw.entry(a.clone()).or_insert(0.0) += product;
            } else {
                conflict += product;
            }
        }
        *raw.entry(a.clone()).or_insert(0.0) += mass_a * right.uncertainty;
    }

    for (b, mass_b) in &right.assignments {
        *raw.entry(b.clone()).or_insert(0.0) += left.uncertainty * mass_b;
    }

    let denominator = 1.0 - conflict;
    if denominator < CONFLICT_TOLERANCE {
        return Err(ConflictError { conflict });
    }

    let assignments = raw
        .into_iter()
        .filter(|(_, mass)| *mass > 0.0)
        .map(|(code, mass)| (code, mass / denominator))
        .collect();

    Ok(MassFunction {
        assignments,
        uncertainty: left.uncertainty * right.uncertainty / denominator,
    })
}

/// Fold every mass function together in the given order.
///
/// A single mass function is returned untouched.
pub fn combine_all(masses: &[MassFunction]) -> Result<MassFunction, DiagnosisError> {
    let (first, rest) = masses
        .split_first()
        .ok_or(ValidationError::EmptySelection)?;

    let mut combined = first.clone();
    for next in rest {
        combined = combine(&combined, next)?;
    }
    Ok(combined)
}
