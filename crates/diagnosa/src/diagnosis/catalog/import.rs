use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

use super::parser::{parse_mass_entry, parse_rows, split_list, DamageRow, SymptomRow};
use super::CatalogSnapshot;
use crate::diagnosis::domain::{Damage, DamageCode, SeverityTier, Symptom, SymptomCode};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    DuplicateDamage(DamageCode),
    DuplicateSymptom(SymptomCode),
    InvalidPrior { damage: DamageCode, value: f64 },
    UnknownSeverity { damage: DamageCode, value: String },
    InvalidMassEntry { symptom: SymptomCode, entry: String },
    InvalidUncertainty { symptom: SymptomCode, value: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid catalog JSON data: {}", err),
            CatalogImportError::DuplicateDamage(code) => {
                write!(f, "damage {} appears more than once", code)
            }
            CatalogImportError::DuplicateSymptom(code) => {
                write!(f, "symptom {} appears more than once", code)
            }
            CatalogImportError::InvalidPrior { damage, value } => write!(
                f,
                "damage {} has prior probability {} outside (0, 0.5]",
                damage, value
            ),
            CatalogImportError::UnknownSeverity { damage, value } => {
                write!(f, "damage {} has unknown severity '{}'", damage, value)
            }
            CatalogImportError::InvalidMassEntry { symptom, entry } => write!(
                f,
                "symptom {} has mass entry '{}', expected CODE:MASS",
                symptom, entry
            ),
            CatalogImportError::InvalidUncertainty { symptom, value } => {
                write!(f, "symptom {} has non-numeric uncertainty '{}'", symptom, value)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads administrator catalog exports into a validated [`CatalogSnapshot`].
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<CatalogSnapshot, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Reads `{ "symptoms": [...], "damages": [...] }`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<CatalogSnapshot, CatalogImportError> {
        let catalog: CatalogSnapshot = serde_json::from_reader(reader)?;
        validate(&catalog)?;
        Ok(catalog)
    }

    pub fn from_csv_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        symptoms: P,
        damages: Q,
    ) -> Result<CatalogSnapshot, CatalogImportError> {
        let symptoms = std::fs::File::open(symptoms)?;
        let damages = std::fs::File::open(damages)?;
        Self::from_csv_readers(symptoms, damages)
    }

    pub fn from_csv_readers<S: Read, D: Read>(
        symptoms: S,
        damages: D,
    ) -> Result<CatalogSnapshot, CatalogImportError> {
        let damages = parse_rows::<_, DamageRow>(damages)?
            .into_iter()
            .map(damage_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let symptoms = parse_rows::<_, SymptomRow>(symptoms)?
            .into_iter()
            .map(symptom_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = CatalogSnapshot::new(symptoms, damages);
        validate(&catalog)?;
        Ok(catalog)
    }
}

fn damage_from_row(row: DamageRow) -> Result<Damage, CatalogImportError> {
    let code = DamageCode(row.code);
    let severity =
        SeverityTier::parse(&row.severity).ok_or_else(|| CatalogImportError::UnknownSeverity {
            damage: code.clone(),
            value: row.severity.clone(),
        })?;

    Ok(Damage {
        code,
        name: row.name,
        description: row.description,
        severity,
        cost_estimate: row.cost_estimate,
        time_estimate: row.time_estimate,
        prior_probability: row.prior_probability,
        solution: row.solution,
        related_symptoms: split_list(row.related_symptoms.as_deref())
            .into_iter()
            .map(SymptomCode)
            .collect(),
        updated_at: None,
    })
}

fn symptom_from_row(row: SymptomRow) -> Result<Symptom, CatalogImportError> {
    let code = SymptomCode(row.code);

    let mut mass_function = BTreeMap::new();
    for entry in split_list(row.mass_function.as_deref()) {
        let (damage, mass) =
            parse_mass_entry(&entry).ok_or_else(|| CatalogImportError::InvalidMassEntry {
                symptom: code.clone(),
                entry: entry.clone(),
            })?;
        mass_function.insert(DamageCode(damage), mass);
    }

    let uncertainty = match row.uncertainty {
        Some(raw) => Some(raw.trim().parse::<f64>().map_err(|_| {
            CatalogImportError::InvalidUncertainty {
                symptom: code.clone(),
                value: raw.clone(),
            }
        })?),
        None => None,
    };

    Ok(Symptom {
        code,
        name: row.name,
        description: row.description,
        category: row.category,
        device_types: split_list(row.device_types.as_deref()),
        mass_function,
        uncertainty,
        updated_at: None,
    })
}

/// Structural checks shared by every import path.
///
/// Mass functions pointing at missing damages are left for the engine to report.
pub(super) fn validate(catalog: &CatalogSnapshot) -> Result<(), CatalogImportError> {
    let mut damage_codes = HashSet::new();
    for damage in catalog.damages() {
        if !damage_codes.insert(&damage.code) {
            return Err(CatalogImportError::DuplicateDamage(damage.code.clone()));
        }
        let prior = damage.prior_probability;
        if !(prior > 0.0 && prior <= 0.5) {
            return Err(CatalogImportError::InvalidPrior {
                damage: damage.code.clone(),
                value: prior,
            });
        }
    }

    let mut symptom_codes = HashSet::new();
    for symptom in catalog.symptoms() {
        if !symptom_codes.insert(&symptom.code) {
            return Err(CatalogImportError::DuplicateSymptom(symptom.code.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAMAGES: &str = "Code,Name,Description,Severity,Cost Estimate,Time Estimate,Prior Probability,Solution,Related Symptoms\n\
KK1,PSU Failure,Power supply is dead,Berat,Rp 500.000,1 hour,0.2,Replace the PSU,G1;G2\n\
KK2,RAM Failure,,sedang,,,0.1,Reseat memory,\n";

    const SYMPTOMS: &str = "Code,Name,Description,Category,Device Types,Mass Function,Uncertainty\n\
G1,No power,,power,desktop;laptop,KK1:0.6,\n\
G2,Random restarts,,power,,KK1:0.3;KK2:0.2,0.5\n";

    #[test]
    fn csv_import_builds_catalog() {
        let catalog = CatalogImporter::from_csv_readers(SYMPTOMS.as_bytes(), DAMAGES.as_bytes())
            .expect("catalog imports");

        let psu = catalog
            .damage(&DamageCode::from("KK1"))
            .expect("psu damage present");
        assert_eq!(psu.severity, SeverityTier::Severe);
        assert_eq!(
            psu.related_symptoms,
            vec![SymptomCode::from("G1"), SymptomCode::from("G2")]
        );

        let restarts = catalog
            .symptom(&SymptomCode::from("G2"))
            .expect("restart symptom present");
        assert_eq!(restarts.mass_function.len(), 2);
        assert_eq!(restarts.uncertainty, Some(0.5));
        assert!(restarts.device_types.is_empty());

        let no_power = catalog
            .symptom(&SymptomCode::from("G1"))
            .expect("no power symptom present");
        assert_eq!(no_power.device_types, vec!["desktop", "laptop"]);
        assert_eq!(no_power.uncertainty, None);
    }

    #[test]
    fn csv_import_rejects_malformed_mass_entries() {
        let symptoms = "Code,Name,Description,Category,Device Types,Mass Function,Uncertainty\n\
G1,No power,,power,,KK1=0.6,\n";

        let error = CatalogImporter::from_csv_readers(symptoms.as_bytes(), DAMAGES.as_bytes())
            .expect_err("mass entry rejected");

        assert!(matches!(
            error,
            CatalogImportError::InvalidMassEntry { ref entry, .. } if entry == "KK1=0.6"
        ));
    }

    #[test]
    fn json_import_rejects_out_of_range_priors() {
        let json = r#"{
            "symptoms": [],
            "damages": [{
                "code": "KK1",
                "name": "PSU Failure",
                "severity": "severe",
                "prior_probability": 0.75
            }]
        }"#;

        let error = CatalogImporter::from_json_reader(json.as_bytes()).expect_err("prior rejected");

        match error {
            CatalogImportError::InvalidPrior { damage, value } => {
                assert_eq!(damage, DamageCode::from("KK1"));
                assert_eq!(value, 0.75);
            }
            other => panic!("expected invalid prior, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_symptom_codes_are_rejected() {
        let symptoms = "Code,Name,Description,Category,Device Types,Mass Function,Uncertainty\n\
G1,No power,,power,,KK1:0.6,\n\
G1,No power again,,power,,KK1:0.5,\n";

        let error = CatalogImporter::from_csv_readers(symptoms.as_bytes(), DAMAGES.as_bytes())
            .expect_err("duplicate rejected");

        assert!(matches!(
            error,
            CatalogImportError::DuplicateSymptom(code) if code.as_str() == "G1"
        ));
    }
}
