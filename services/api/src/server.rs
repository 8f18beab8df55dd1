use crate::cli::ServeArgs;
use crate::infra::{directory_from, load_snapshot, AppState};
use crate::routes::with_admissions_routes;
use admitpath::config::AppConfig;
use admitpath::error::AppError;
use admitpath::telemetry;
use admitpath::workflows::admissions::{AdmissionsService, EligibilityConfig};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let snapshot = load_snapshot(args.snapshot_dir.as_deref())?;
    let repository = directory_from(snapshot);
    let service = Arc::new(
        AdmissionsService::new(repository, EligibilityConfig::default())
            .with_default_window(config.analytics.default_window_days),
    );

    let app = with_admissions_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions analytics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
