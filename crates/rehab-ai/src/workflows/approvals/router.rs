use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ClinicianId, ProgressPayload, RequestId, ReviewVerdict};
use super::repository::ProgressRequestStore;
use super::service::{ApprovalError, ApprovalService};
use crate::workflows::triage::{CaregiverId, PatientId};

/// Router builder exposing the progress-update approval endpoints.
pub fn approvals_router<S>(service: Arc<ApprovalService<S>>) -> Router
where
    S: ProgressRequestStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/progress-updates",
            post(submit_handler::<S>).get(pending_handler::<S>),
        )
        .route(
            "/api/v1/progress-updates/:request_id",
            get(status_handler::<S>),
        )
        .route(
            "/api/v1/progress-updates/:request_id/self-review",
            post(self_review_handler::<S>),
        )
        .route(
            "/api/v1/progress-updates/:request_id/decision",
            post(decision_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    pub(crate) patient_id: String,
    pub(crate) caregiver_id: String,
    #[serde(default)]
    pub(crate) scores: BTreeMap<String, u8>,
    #[serde(default)]
    pub(crate) notes: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelfReviewRequest {
    pub(crate) caregiver_id: String,
    pub(crate) verdict: ReviewVerdict,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionRequest {
    pub(crate) clinician_id: String,
    pub(crate) verdict: ReviewVerdict,
}

const DEFAULT_PENDING_LIMIT: usize = 50;

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ApprovalService<S>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    S: ProgressRequestStore + 'static,
{
    let payload = ProgressPayload {
        scores: request.scores,
        notes: request.notes,
    };

    match service.submit(
        PatientId(request.patient_id),
        CaregiverId(request.caregiver_id),
        payload,
    ) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn pending_handler<S>(
    State(service): State<Arc<ApprovalService<S>>>,
) -> Response
where
    S: ProgressRequestStore + 'static,
{
    match service.pending(DEFAULT_PENDING_LIMIT) {
        Ok(requests) => {
            let views: Vec<_> = requests
                .iter()
                .map(|request| request.status_view())
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<ApprovalService<S>>>,
    Path(request_id): Path<String>,
) -> Response
where
    S: ProgressRequestStore + 'static,
{
    match service.get(&RequestId(request_id)) {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn self_review_handler<S>(
    State(service): State<Arc<ApprovalService<S>>>,
    Path(request_id): Path<String>,
    axum::Json(request): axum::Json<SelfReviewRequest>,
) -> Response
where
    S: ProgressRequestStore + 'static,
{
    match service.self_annotate(
        &RequestId(request_id),
        &CaregiverId(request.caregiver_id),
        request.verdict,
    ) {
        Ok(updated) => (StatusCode::OK, axum::Json(updated.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_handler<S>(
    State(service): State<Arc<ApprovalService<S>>>,
    Path(request_id): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    S: ProgressRequestStore + 'static,
{
    match service.decide(
        &RequestId(request_id),
        &ClinicianId(request.clinician_id),
        request.verdict,
    ) {
        Ok(decided) => (StatusCode::OK, axum::Json(decided.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ApprovalError) -> Response {
    let status = match &error {
        ApprovalError::InvalidIdentifier => StatusCode::BAD_REQUEST,
        ApprovalError::NotFound => StatusCode::NOT_FOUND,
        ApprovalError::Forbidden => StatusCode::FORBIDDEN,
        ApprovalError::InvalidState { .. } => StatusCode::CONFLICT,
        ApprovalError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
