use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryNotificationRepository, InMemoryPatientRepository};
use crate::routes::with_triage_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use smart_triage::config::AppConfig;
use smart_triage::error::AppError;
use smart_triage::telemetry;
use smart_triage::workflows::triage::{HospitalCatalog, TriageService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(HospitalCatalog::demo()?);
    let hospitals = catalog.hospitals().len();
    let triage_service = Arc::new(TriageService::new(
        catalog,
        Arc::new(InMemoryPatientRepository::default()),
        Arc::new(InMemoryNotificationRepository::default()),
        config.triage,
    ));

    let app = with_triage_routes(triage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, hospitals, "triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
