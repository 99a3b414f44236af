use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{HospitalId, PatientId, PatientRecord};
use super::intake::TriageSubmission;
use super::repository::{NotificationRepository, PatientRepository, RepositoryError};
use super::service::{
    DashboardQuery, DispatchRequest, TriageOutcome, TriageService, TriageServiceError,
};

/// Router builder exposing the ambulance and hospital endpoints.
pub fn triage_router<P, N>(service: Arc<TriageService<P, N>>) -> Router
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    Router::new()
        .route("/api/v1/triage/assess", post(assess_handler::<P, N>))
        .route(
            "/api/v1/triage/patients",
            post(submit_handler::<P, N>).get(dashboard_handler::<P, N>),
        )
        .route(
            "/api/v1/triage/patients/:patient_id",
            get(patient_handler::<P, N>),
        )
        .route(
            "/api/v1/triage/patients/:patient_id/admit",
            post(admit_handler::<P, N>),
        )
        .route("/api/v1/triage/dispatch", post(dispatch_handler::<P, N>))
        .route("/api/v1/hospitals", get(catalog_handler::<P, N>))
        .route(
            "/api/v1/hospitals/:hospital_id/incoming",
            get(incoming_handler::<P, N>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct SubmissionView {
    patient: PatientRecord,
    outcome: TriageOutcome,
}

fn error_response(error: TriageServiceError) -> Response {
    let status = match &error {
        TriageServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TriageServiceError::UnknownHospital(_)
        | TriageServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        TriageServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        TriageServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn assess_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
    axum::Json(submission): axum::Json<TriageSubmission>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    match service.assess(&submission) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
    axum::Json(submission): axum::Json<TriageSubmission>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    match service.submit(submission) {
        Ok((patient, outcome)) => (
            StatusCode::CREATED,
            axum::Json(SubmissionView { patient, outcome }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dashboard_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    match service.dashboard(&query) {
        Ok(patients) => (StatusCode::OK, axum::Json(patients)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn patient_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
    Path(patient_id): Path<String>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    match service.patient(&PatientId(patient_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn admit_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
    Path(patient_id): Path<String>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    match service.admit(&PatientId(patient_id)) {
        Ok(notification) => (StatusCode::OK, axum::Json(notification)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dispatch_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
    axum::Json(request): axum::Json<DispatchRequest>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    match service.dispatch(request) {
        Ok(notification) => (StatusCode::CREATED, axum::Json(notification)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    let hospitals = service.catalog().hospitals().to_vec();
    (StatusCode::OK, axum::Json(hospitals)).into_response()
}

pub(crate) async fn incoming_handler<P, N>(
    State(service): State<Arc<TriageService<P, N>>>,
    Path(hospital_id): Path<u32>,
) -> Response
where
    P: PatientRepository + 'static,
    N: NotificationRepository + 'static,
{
    match service.incoming(HospitalId(hospital_id)) {
        Ok(notifications) => (StatusCode::OK, axum::Json(notifications)).into_response(),
        Err(error) => error_response(error),
    }
}
