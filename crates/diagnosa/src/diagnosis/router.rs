use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::CatalogSource;
use super::domain::DiagnosisRequest;
use super::error::DiagnosisError;
use super::service::{DiagnosisService, DiagnosisServiceError};

/// Router builder exposing diagnosis and catalog listing endpoints.
pub fn diagnosis_router<C>(service: Arc<DiagnosisService<C>>) -> Router
where
    C: CatalogSource + 'static,
{
    Router::new()
        .route("/api/v1/diagnosis", post(diagnose_handler::<C>))
        .route("/api/v1/catalog/symptoms", get(symptoms_handler::<C>))
        .route("/api/v1/catalog/damages", get(damages_handler::<C>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SymptomQuery {
    #[serde(default)]
    pub(crate) device_type: Option<String>,
}

pub(crate) async fn diagnose_handler<C>(
    State(service): State<Arc<DiagnosisService<C>>>,
    axum::Json(request): axum::Json<DiagnosisRequest>,
) -> Response
where
    C: CatalogSource + 'static,
{
    match service.diagnose(&request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn symptoms_handler<C>(
    State(service): State<Arc<DiagnosisService<C>>>,
    Query(query): Query<SymptomQuery>,
) -> Response
where
    C: CatalogSource + 'static,
{
    match service.symptoms(query.device_type.as_deref()) {
        Ok(symptoms) => (StatusCode::OK, axum::Json(symptoms)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn damages_handler<C>(
    State(service): State<Arc<DiagnosisService<C>>>,
) -> Response
where
    C: CatalogSource + 'static,
{
    match service.damages() {
        Ok(damages) => (StatusCode::OK, axum::Json(damages)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Status mapping shared by the diagnosis routes and `AppError`.
impl IntoResponse for DiagnosisServiceError {
    fn into_response(self) -> Response {
        match self {
            DiagnosisServiceError::Diagnosis(DiagnosisError::Validation(error)) => {
                let payload = json!({
                    "error": error.to_string(),
                    "kind": "validation",
                });
                (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
            }
            DiagnosisServiceError::Diagnosis(DiagnosisError::Conflict(error)) => {
                let payload = json!({
                    "error": error.to_string(),
                    "kind": "conflict",
                    "conflict": error.conflict,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
            }
            DiagnosisServiceError::Catalog(error) => {
                let payload = json!({
                    "error": error.to_string(),
                    "kind": "catalog",
                });
                (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
            }
        }
    }
}
