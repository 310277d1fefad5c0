use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::PatientId;
use super::repository::{AssignmentLedger, CaregiverDirectory, NotificationPublisher};
use super::service::{TriageService, TriageServiceError};

/// Router builder exposing the triage endpoints.
pub fn triage_router<D, L, N>(service: Arc<TriageService<D, L, N>>) -> Router
where
    D: CaregiverDirectory + 'static,
    L: AssignmentLedger + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/triage/assignments", post(assign_handler::<D, L, N>))
        .route(
            "/api/v1/triage/load-report",
            get(load_report_handler::<D, L, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignRequest {
    pub(crate) patient_id: String,
    pub(crate) description: String,
}

pub(crate) async fn assign_handler<D, L, N>(
    State(service): State<Arc<TriageService<D, L, N>>>,
    axum::Json(request): axum::Json<AssignRequest>,
) -> Response
where
    D: CaregiverDirectory + 'static,
    L: AssignmentLedger + 'static,
    N: NotificationPublisher + 'static,
{
    let patient_id = PatientId(request.patient_id);
    match service
        .assign_caregiver(patient_id, &request.description)
        .await
    {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(TriageServiceError::Input(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(TriageServiceError::NoActiveCaregivers) => {
            let payload = json!({
                "error": "no active caregivers available; activate a caregiver and retry",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn load_report_handler<D, L, N>(
    State(service): State<Arc<TriageService<D, L, N>>>,
) -> Response
where
    D: CaregiverDirectory + 'static,
    L: AssignmentLedger + 'static,
    N: NotificationPublisher + 'static,
{
    match service.load_report() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
