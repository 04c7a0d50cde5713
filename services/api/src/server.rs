use crate::cli::ServeArgs;
use crate::infra::{AppState, TracingNotifier};
use crate::routes::with_interview_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use interview_scheduler::config::AppConfig;
use interview_scheduler::error::AppError;
use interview_scheduler::scheduling::{InMemoryInterviewStore, InterviewSchedulingService};
use interview_scheduler::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryInterviewStore::new());
    let notifier = Arc::new(TracingNotifier);
    let scheduling_service = Arc::new(InterviewSchedulingService::new(
        store,
        notifier,
        config.scheduling,
    ));

    let app = with_interview_routes(scheduling_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        enforce_slot_grid = config.scheduling.enforce_slot_grid,
        "interview scheduler ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
