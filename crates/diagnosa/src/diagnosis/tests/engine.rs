use super::common::*;
use crate::diagnosis::catalog::CatalogSnapshot;
use crate::diagnosis::domain::{DamageCode, DiagnosisRequest, SymptomCode};
use crate::diagnosis::engine::{compute_diagnosis, DiagnosisEngine, DiagnosisOptions};
use crate::diagnosis::error::{DiagnosisError, ValidationError};

fn validation_error(result: Result<impl std::fmt::Debug, DiagnosisError>) -> ValidationError {
    match result {
        Err(DiagnosisError::Validation(error)) => error,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn maximum_selection_succeeds_and_one_more_fails() {
    let catalog = example_catalog();
    let engine = DiagnosisEngine::default();

    let five = DiagnosisRequest::new(["G1", "G2", "G3", "G4", "G5"]);
    let report = engine.diagnose(&five, &catalog).expect("five symptoms allowed");
    assert_eq!(report.summary.symptom_count, 5);

    let six = DiagnosisRequest::new(["G1", "G2", "G3", "G4", "G5", "G6"]);
    let error = validation_error(engine.diagnose(&six, &catalog));
    assert_eq!(
        error,
        ValidationError::TooManySymptoms {
            selected: 6,
            max: 5
        }
    );
}

#[test]
fn configured_maximum_is_honored() {
    let engine = DiagnosisEngine::new(DiagnosisOptions {
        max_symptoms: 2,
        top_n: None,
    });

    let error = validation_error(
        engine.diagnose(&DiagnosisRequest::new(["G1", "G2", "G3"]), &example_catalog()),
    );

    assert!(matches!(
        error,
        ValidationError::TooManySymptoms { selected: 3, max: 2 }
    ));
}

#[test]
fn empty_selection_is_rejected() {
    let error = validation_error(compute_diagnosis(
        &[],
        &example_symptoms(),
        &example_damages(),
        &DiagnosisOptions::default(),
    ));

    assert_eq!(error, ValidationError::EmptySelection);
}

#[test]
fn duplicate_selection_is_rejected() {
    let error = validation_error(compute_diagnosis(
        &codes(&["G1", "G2", "G1"]),
        &example_symptoms(),
        &example_damages(),
        &DiagnosisOptions::default(),
    ));

    assert_eq!(error, ValidationError::DuplicateSymptom(SymptomCode::from("G1")));
}

#[test]
fn unknown_symptom_is_rejected() {
    let error = validation_error(compute_diagnosis(
        &codes(&["G1", "G42"]),
        &example_symptoms(),
        &example_damages(),
        &DiagnosisOptions::default(),
    ));

    assert_eq!(error, ValidationError::UnknownSymptom(SymptomCode::from("G42")));
}

#[test]
fn device_filter_rejects_inapplicable_symptoms() {
    let engine = DiagnosisEngine::default();
    let catalog = example_catalog();

    let mut request = DiagnosisRequest::new(["G1", "G7"]);
    request.device_type = Some("desktop".to_string());
    let error = validation_error(engine.diagnose(&request, &catalog));
    assert_eq!(
        error,
        ValidationError::SymptomNotApplicable {
            symptom: SymptomCode::from("G7"),
            device_type: "desktop".to_string(),
        }
    );

    request.device_type = Some("Laptop".to_string());
    engine
        .diagnose(&request, &catalog)
        .expect("laptop symptoms apply to laptops");
}

#[test]
fn invalid_options_are_rejected() {
    let zero_max = validation_error(compute_diagnosis(
        &codes(&["G1"]),
        &example_symptoms(),
        &example_damages(),
        &DiagnosisOptions {
            max_symptoms: 0,
            top_n: None,
        },
    ));
    assert!(matches!(zero_max, ValidationError::InvalidOption(_)));

    let mut request = DiagnosisRequest::new(["G1"]);
    request.top_n = Some(0);
    let zero_top =
        validation_error(DiagnosisEngine::default().diagnose(&request, &example_catalog()));
    assert!(matches!(zero_top, ValidationError::InvalidOption(_)));
}

#[test]
fn request_top_n_overrides_engine_default() {
    let engine = DiagnosisEngine::new(DiagnosisOptions {
        max_symptoms: 5,
        top_n: Some(2),
    });
    let mut request = DiagnosisRequest::new(["G1", "G2"]);
    request.top_n = Some(1);

    let report = engine
        .diagnose(&request, &example_catalog())
        .expect("diagnosis succeeds");

    assert_eq!(report.results.len(), 1);
}

#[test]
fn malformed_catalog_entry_aborts_with_symptom_code() {
    let catalog = CatalogSnapshot::new(
        vec![
            symptom("G1", "power", &[("KK1", 0.6)], None),
            symptom("G2", "power", &[("KK1", 0.7), ("KK2", 0.5)], None),
        ],
        example_damages(),
    );

    let error = validation_error(
        DiagnosisEngine::default().diagnose(&DiagnosisRequest::new(["G1", "G2"]), &catalog),
    );

    match error {
        ValidationError::MalformedMassFunction { symptom, .. } => {
            assert_eq!(symptom, SymptomCode::from("G2"))
        }
        other => panic!("expected malformed mass function, got {other:?}"),
    }
}

#[test]
fn identical_inputs_serialize_identically() {
    let catalog = example_catalog();
    let engine = DiagnosisEngine::default();
    let request = DiagnosisRequest::new(["G2", "G1", "G5"]);

    let first = serde_json::to_string(&engine.diagnose(&request, &catalog).expect("diagnoses"))
        .expect("serializes");
    let second = serde_json::to_string(&engine.diagnose(&request, &catalog).expect("diagnoses"))
        .expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn standard_catalog_diagnoses_power_supply() {
    let report = DiagnosisEngine::default()
        .diagnose(
            &DiagnosisRequest::new(["G1", "G2"]),
            &CatalogSnapshot::standard(),
        )
        .expect("diagnosis succeeds");

    let top = report.top().expect("top result");
    assert_eq!(top.code, DamageCode::from("KK1"));
    assert_eq!(report.results.len(), 8);
    assert!(report.warnings.is_empty());
}

#[test]
fn repeated_catalog_symptom_codes_are_rejected() {
    let mut symptoms = example_symptoms();
    symptoms.push(symptom("G1", "power", &[("KK2", 0.4)], None));

    let error = validation_error(compute_diagnosis(
        &codes(&["G1"]),
        &symptoms,
        &example_damages(),
        &DiagnosisOptions::default(),
    ));

    assert_eq!(
        error,
        ValidationError::DuplicateCatalogSymptom(SymptomCode::from("G1"))
    );
}

#[test]
fn repeated_catalog_damage_codes_are_rejected() {
    let mut damages = example_damages();
    damages.push(damages[0].clone());

    let error = validation_error(compute_diagnosis(
        &codes(&["G1"]),
        &example_symptoms(),
        &damages,
        &DiagnosisOptions::default(),
    ));

    assert_eq!(
        error,
        ValidationError::DuplicateCatalogDamage(DamageCode::from("KK1"))
    );
}
