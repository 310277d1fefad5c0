use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::triage::domain::CareTier;
use crate::workflows::triage::router::triage_router;

fn post_assignment(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/triage/assignments")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn assign_route_creates_assignments() {
    let roster = vec![caregiver("cg-router", Some(CareTier::Bronze))];
    let (service, _, _) = build_service(Arc::new(FailingGateway), roster);
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(post_assignment(json!({
            "patient_id": "p-router-1",
            "description": "minor scrape on the knee",
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .pointer("/assignment/caregiver_id")
            .and_then(serde_json::Value::as_str),
        Some("cg-router")
    );
    assert_eq!(
        payload
            .pointer("/assessment/required_tier")
            .and_then(serde_json::Value::as_str),
        Some("bronze")
    );
    assert_eq!(
        payload
            .pointer("/assessment/is_fallback")
            .and_then(serde_json::Value::as_bool),
        Some(true)
    );
}

#[tokio::test]
async fn assign_route_rejects_empty_descriptions() {
    let roster = vec![caregiver("cg-router", None)];
    let (service, _, _) = build_service(Arc::new(FailingGateway), roster);
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(post_assignment(json!({
            "patient_id": "p-router-2",
            "description": "   ",
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn assign_route_reports_conflict_without_active_caregivers() {
    let (service, _, _) = build_service(Arc::new(FailingGateway), Vec::new());
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(post_assignment(json!({
            "patient_id": "p-router-3",
            "description": "shoulder strain during lifting drills",
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn load_report_route_renders_entries() {
    let roster = vec![caregiver("cg-report", Some(CareTier::Silver))];
    let (service, _, _) = build_service(Arc::new(FailingGateway), roster);
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/triage/load-report")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload
        .get("entries")
        .and_then(serde_json::Value::as_array)
        .expect("entries array");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].get("caregiver_id").and_then(serde_json::Value::as_str),
        Some("cg-report")
    );
}
