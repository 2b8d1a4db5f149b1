use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredStore};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use career_readiness::assessment::AssessmentService;
use career_readiness::config::AppConfig;
use career_readiness::error::AppError;
use career_readiness::telemetry;
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

    let store = ConfiguredStore::from_config(&config.store)?;
    let store_description = store.describe();
    let assessment_service = Arc::new(AssessmentService::with_idle_timeout(
        Arc::new(store),
        config.sessions.idle_timeout,
    ));

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        store = %store_description,
        idle_timeout_secs = config.sessions.idle_timeout.as_secs(),
        "career readiness service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
