use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryConfigStore, InMemoryEventStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_fit::config::AppConfig;
use talent_fit::error::AppError;
use talent_fit::scoring::ScoringService;
use talent_fit::telemetry;
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

    let scoring_service = Arc::new(ScoringService::new(
        Arc::new(InMemoryConfigStore::default()),
        Arc::new(InMemoryEventStore::default()),
        config.scoring.default_plan,
    ));

    let app = with_service_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_plan = config.scoring.default_plan.label(),
        "talent fit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
