use super::common::*;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::triage::catalog::HospitalCatalog;
use crate::workflows::triage::router::{
    admit_handler, assess_handler, dashboard_handler, dispatch_handler, incoming_handler,
    patient_handler, submit_handler,
};
use crate::workflows::triage::service::{
    DashboardQuery, DispatchRequest, TriageConfig, TriageService,
};
use crate::workflows::triage::{triage_router, HospitalId};

#[tokio::test]
async fn assess_handler_returns_ranked_outcome() {
    let (service, _, _) = build_service();

    let response = assess_handler::<MemoryPatients, MemoryNotifications>(
        State(Arc::new(service)),
        axum::Json(submission_from(&chest_pain_vitals())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["priority"], "medium");
    assert_eq!(payload["score"], 6);
    let matches = payload["matches"].as_array().expect("matches array");
    assert_eq!(matches[0]["hospital"]["id"], 2);
    assert_eq!(matches[0]["match_score"], 11);
    assert_eq!(matches[0]["match_percentage"], 37);
    assert!(payload.get("fallback").is_none());
}

#[tokio::test]
async fn assess_handler_rejects_missing_vitals() {
    let (service, _, _) = build_service();
    let mut submission = submission_from(&stable_vitals());
    submission.oxygen_saturation = None;

    let response = assess_handler::<MemoryPatients, MemoryNotifications>(
        State(Arc::new(service)),
        axum::Json(submission),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("oxygen_saturation")));
}

#[tokio::test]
async fn submit_handler_returns_created_record() {
    let (service, patients, _) = build_service();

    let response = submit_handler::<MemoryPatients, MemoryNotifications>(
        State(Arc::new(service)),
        axum::Json(submission_from(&critical_vitals())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["patient"]["priority"], "high");
    assert_eq!(payload["outcome"]["priority"], "high");
    assert!(payload["patient"]["id"].as_str().is_some());
    assert_eq!(
        patients.records.lock().expect("repository mutex poisoned").len(),
        1
    );
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(TriageService::new(
        Arc::new(HospitalCatalog::demo().expect("demo catalog is valid")),
        Arc::new(UnavailablePatients),
        Arc::new(MemoryNotifications::default()),
        TriageConfig::default(),
    ));

    let response = submit_handler::<UnavailablePatients, MemoryNotifications>(
        State(service),
        axum::Json(submission_from(&stable_vitals())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn patient_handler_returns_not_found_for_unknown_id() {
    let (service, _, _) = build_service();

    let response = patient_handler::<MemoryPatients, MemoryNotifications>(
        State(Arc::new(service)),
        Path("P-none".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dispatch_handler_rejects_unknown_hospital() {
    let (service, _, notifications) = build_service();
    let service = Arc::new(service);
    let (record, _) = service
        .submit(submission_from(&stable_vitals()))
        .expect("submission succeeds");

    let response = dispatch_handler::<MemoryPatients, MemoryNotifications>(
        State(service),
        axum::Json(DispatchRequest {
            patient_id: record.id,
            hospital_id: HospitalId(42),
            eta_minutes: 9,
            ambulance_crew_id: "MEDIC-2".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(notifications.events().is_empty());
}

#[tokio::test]
async fn dispatch_then_admit_flows_through_handlers() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let (record, _) = service
        .submit(submission_from(&chest_pain_vitals()))
        .expect("submission succeeds");

    let response = dispatch_handler::<MemoryPatients, MemoryNotifications>(
        State(service.clone()),
        axum::Json(DispatchRequest {
            patient_id: record.id.clone(),
            hospital_id: HospitalId(2),
            eta_minutes: 14,
            ambulance_crew_id: "MEDIC-5".to_string(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "pending");

    let response = incoming_handler::<MemoryPatients, MemoryNotifications>(
        State(service.clone()),
        Path(2),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));

    let response = admit_handler::<MemoryPatients, MemoryNotifications>(
        State(service),
        Path(record.id.0.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "arrived");
    assert_eq!(payload["eta_minutes"], 14);
}

#[tokio::test]
async fn admit_handler_returns_not_found_without_notification() {
    let (service, _, _) = build_service();

    let response = admit_handler::<MemoryPatients, MemoryNotifications>(
        State(Arc::new(service)),
        Path("P-ghost".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_handler_applies_priority_filter() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service
        .submit(submission_from(&stable_vitals()))
        .expect("low submitted");
    service
        .submit(submission_from(&critical_vitals()))
        .expect("high submitted");

    let response = dashboard_handler::<MemoryPatients, MemoryNotifications>(
        State(service),
        Query(DashboardQuery {
            priority: Some(crate::workflows::triage::PriorityLevel::High),
            search: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let rows = payload.as_array().expect("array payload");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["priority"], "high");
}

#[tokio::test]
async fn submit_route_accepts_combined_blood_pressure() {
    let (service, _, _) = build_service();
    let router = triage_router(Arc::new(service));

    let body = json!({
        "heart_rate": 110,
        "blood_pressure": "165/105",
        "respiratory_rate": 22,
        "oxygen_saturation": 92,
        "temperature": 38.5,
        "gcs": 14,
        "blood_glucose": 90,
        "chief_complaint": "Chest pain",
        "symptoms": "chest pain radiating to arm"
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/triage/patients")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["patient"]["vitals"]["systolic_bp"], 165);
    assert_eq!(payload["patient"]["vitals"]["diastolic_bp"], 105);
    assert_eq!(payload["outcome"]["score"], 6);
}

#[tokio::test]
async fn submit_route_rejects_malformed_blood_pressure() {
    let (service, _, _) = build_service();
    let router = triage_router(Arc::new(service));

    let mut body = serde_json::to_value(submission_from(&stable_vitals())).unwrap();
    body["systolic_bp"] = Value::Null;
    body["diastolic_bp"] = Value::Null;
    body["blood_pressure"] = json!("80/120");

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/triage/assess")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn hospitals_route_lists_catalog() {
    let (service, _, _) = build_service();
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/hospitals")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(5));
    assert_eq!(payload[0]["name"], "City General Hospital");
}

#[tokio::test]
async fn incoming_route_returns_not_found_for_unknown_hospital() {
    let (service, _, _) = build_service();
    let router = triage_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/hospitals/77/incoming")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
