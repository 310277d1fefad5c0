use crate::infra::{
    AppState, InMemoryAssignmentLedger, InMemoryCaregiverDirectory, InMemoryProgressStore,
    LoggingNotificationPublisher,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rehab_ai::workflows::approvals::{approvals_router, ApprovalService};
use rehab_ai::workflows::triage::{triage_router, TriageService};
use serde_json::json;
use std::sync::Arc;

pub(crate) type AppTriageService =
    TriageService<InMemoryCaregiverDirectory, InMemoryAssignmentLedger, LoggingNotificationPublisher>;
pub(crate) type AppApprovalService = ApprovalService<InMemoryProgressStore>;

pub(crate) fn with_app_routes(
    triage: Arc<AppTriageService>,
    approvals: Arc<AppApprovalService>,
) -> axum::Router {
    triage_router(triage)
        .merge(approvals_router(approvals))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
