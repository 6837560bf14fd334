use crate::cli::ServeArgs;
use crate::infra::{catalog_for, AppState, InMemorySessionRepository};
use crate::routes::with_mission_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dauntless::config::AppConfig;
use dauntless::error::AppError;
use dauntless::telemetry;
use dauntless::workflows::mission::MissionService;
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

    let catalog = Arc::new(catalog_for(&config.mission, None)?);
    let settings = config.mission.settings();
    info!(
        stories = catalog.len(),
        variability = settings.variability.label(),
        debug_analysis = settings.debug_analysis,
        "mission catalog ready"
    );
    let mission_service = Arc::new(MissionService::new(
        Arc::new(InMemorySessionRepository::default()),
        catalog,
        settings,
    ));

    let app = with_mission_routes(mission_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mission prioritisation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
