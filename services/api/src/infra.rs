use diagnosa::config::DiagnosisConfig;
use diagnosa::diagnosis::{CatalogImporter, CatalogSnapshot};
use diagnosa::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the catalog from an explicit path, the configured path, or the built-in set.
pub(crate) fn load_catalog(
    explicit: Option<&Path>,
    config: &DiagnosisConfig,
) -> Result<CatalogSnapshot, AppError> {
    match explicit.or(config.catalog_path.as_deref()) {
        Some(path) => {
            let catalog = CatalogImporter::from_json_path(path)?;
            info!(
                path = %path.display(),
                symptoms = catalog.symptoms().len(),
                damages = catalog.damages().len(),
                "catalog loaded"
            );
            Ok(catalog)
        }
        None => Ok(CatalogSnapshot::standard()),
    }
}
