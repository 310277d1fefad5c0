use crate::cli::ServeArgs;
use crate::infra::{
    demo_roster, load_roster, AppState, InMemoryAssignmentLedger, InMemoryCaregiverDirectory,
    InMemoryProgressStore, LoggingNotificationPublisher,
};
use crate::routes::with_app_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rehab_ai::config::AppConfig;
use rehab_ai::error::AppError;
use rehab_ai::telemetry;
use rehab_ai::workflows::approvals::ApprovalService;
use rehab_ai::workflows::triage::{
    ClassificationGateway, DisabledClassificationGateway, HttpClassificationGateway,
    TriageService,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let gateway = classification_gateway(&config)?;
    let roster = match args.roster.take() {
        Some(path) => load_roster(&path)?,
        None => {
            warn!("no --roster file supplied; serving the built-in demo roster");
            demo_roster()
        }
    };

    let directory = Arc::new(InMemoryCaregiverDirectory::with_roster(roster));
    let ledger = Arc::new(InMemoryAssignmentLedger::default());
    let notifier = Arc::new(LoggingNotificationPublisher::default());
    let triage_service = Arc::new(TriageService::new(gateway, directory, ledger, notifier));

    let progress_store = Arc::new(InMemoryProgressStore::default());
    let approval_service = Arc::new(ApprovalService::new(progress_store));

    let app = with_app_routes(triage_service, approval_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rehab care orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn classification_gateway(
    config: &AppConfig,
) -> Result<Arc<dyn ClassificationGateway>, AppError> {
    match HttpClassificationGateway::from_config(&config.classifier) {
        Ok(Some(gateway)) => Ok(Arc::new(gateway)),
        Ok(None) => {
            warn!("CLASSIFIER_ENDPOINT not set; severity classification runs on the local heuristic");
            Ok(Arc::new(DisabledClassificationGateway))
        }
        Err(err) => Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            err.to_string(),
        ))),
    }
}
