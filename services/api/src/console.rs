use crate::infra::load_catalog;
use chrono::{DateTime, Utc};
use clap::Args;
use diagnosa::config::AppConfig;
use diagnosa::diagnosis::{
    CatalogSnapshot, DiagnosisReport, DiagnosisRequest, DiagnosisService, SymptomCode,
};
use diagnosa::error::AppError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Symptom code to include; repeat for each observed symptom
    #[arg(long = "symptom", short = 's', required = true)]
    pub(crate) symptoms: Vec<String>,
    /// Only accept symptoms that apply to this device type
    #[arg(long)]
    pub(crate) device_type: Option<String>,
    /// Show only the N most probable failures
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// JSON catalog export (defaults to the configured or built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Only list symptoms that apply to this device type
    #[arg(long)]
    pub(crate) device_type: Option<String>,
    /// JSON catalog export (defaults to the configured or built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DiagnosisEnvelope<'a> {
    generated_at: DateTime<Utc>,
    request: &'a DiagnosisRequest,
    report: &'a DiagnosisReport,
}

pub(crate) fn run_diagnosis(args: DiagnoseArgs) -> Result<(), AppError> {
    let DiagnoseArgs {
        symptoms,
        device_type,
        top,
        catalog,
        json,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(catalog.as_deref(), &config.diagnosis)?;
    let service = DiagnosisService::new(Arc::new(catalog), config.diagnosis.options());

    let request = DiagnosisRequest {
        symptoms: symptoms.into_iter().map(SymptomCode).collect(),
        device_type,
        top_n: top,
    };
    let report = service.diagnose(&request)?;

    if json {
        let envelope = DiagnosisEnvelope {
            generated_at: Utc::now(),
            request: &request,
            report: &report,
        };
        let rendered = serde_json::to_string_pretty(&envelope)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        println!("{rendered}");
    } else {
        render_report(&request, &report);
    }

    Ok(())
}

pub(crate) fn run_catalog_listing(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(args.catalog.as_deref(), &config.diagnosis)?;
    render_catalog(&catalog, args.device_type.as_deref());
    Ok(())
}

fn render_report(request: &DiagnosisRequest, report: &DiagnosisReport) {
    let selected = request
        .symptoms
        .iter()
        .map(SymptomCode::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Diagnosis for symptoms: {selected}");

    let summary = &report.summary;
    println!(
        "- Accuracy {:.2}% | severity {} | dominant category {}",
        summary.accuracy_percent,
        summary
            .severity
            .map(|tier| tier.label())
            .unwrap_or("n/a"),
        summary.dominant_category.as_deref().unwrap_or("n/a"),
    );
    println!(
        "- Unassigned belief after combination: {:.4}",
        summary.combined_uncertainty
    );

    println!("Ranked failures:");
    for (rank, result) in report.results.iter().enumerate() {
        let contributors = result
            .contributing_symptoms
            .iter()
            .map(SymptomCode::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {}. [{}] {} | belief {:.4} | plausibility {:.4} | {} confidence",
            rank + 1,
            result.code,
            result.name,
            result.belief,
            result.plausibility,
            result.confidence
        );
        if !contributors.is_empty() {
            println!("     supported by: {contributors}");
        }
        if result.belief > 0.0 && !result.solution.is_empty() {
            println!(
                "     fix: {} ({}, {})",
                result.solution, result.cost_estimate, result.time_estimate
            );
        }
    }

    if !report.warnings.is_empty() {
        println!("Catalog warnings:");
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
}

fn render_catalog(catalog: &CatalogSnapshot, device_type: Option<&str>) {
    let symptoms = match device_type {
        Some(device_type) => catalog.symptoms_for_device(device_type),
        None => catalog.symptoms().iter().collect(),
    };

    println!("Symptoms ({}):", symptoms.len());
    for symptom in symptoms {
        let devices = if symptom.device_types.is_empty() {
            "all devices".to_string()
        } else {
            symptom.device_types.join(", ")
        };
        println!(
            "  [{}] {} | {} | {}",
            symptom.code, symptom.name, symptom.category, devices
        );
    }

    println!("Damages ({}):", catalog.damages().len());
    for damage in catalog.damages() {
        println!(
            "  [{}] {} | {} severity | prior {:.2}",
            damage.code, damage.name, damage.severity, damage.prior_probability
        );
    }
}
