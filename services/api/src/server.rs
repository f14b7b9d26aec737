use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use crm_reports::config::AppConfig;
use crm_reports::crm::{CrmService, InMemoryCrmStore};
use crm_reports::error::AppError;
use crm_reports::reports::{InMemoryReportSource, ReportService};
use crm_reports::telemetry;
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

    let report_service = Arc::new(ReportService::new(Arc::new(
        InMemoryReportSource::default(),
    )));
    let crm_service = Arc::new(CrmService::new(Arc::new(InMemoryCrmStore::seeded())));

    let app = with_service_routes(report_service, crm_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "crm reports service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
