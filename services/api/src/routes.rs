use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use crm_reports::crm::{crm_router, CrmService, CrmStore};
use crm_reports::reports::{report_router, ReportDataSource, ReportService};
use serde_json::json;
use std::sync::Arc;

/// Report and record APIs plus the operational endpoints. Expects an
/// `Extension<AppState>` layer on top.
pub(crate) fn with_service_routes<S, C>(
    reports: Arc<ReportService<S>>,
    records: Arc<CrmService<C>>,
) -> axum::Router
where
    S: ReportDataSource + 'static,
    C: CrmStore + 'static,
{
    report_router(reports)
        .merge(crm_router(records))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
