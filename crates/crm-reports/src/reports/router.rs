use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use super::domain::ReportType;
use super::service::ReportService;
use super::source::ReportDataSource;
use crate::error::AppError;

/// Router builder exposing the report catalog, views, exports and refresh.
pub fn report_router<S>(service: Arc<ReportService<S>>) -> Router
where
    S: ReportDataSource + 'static,
{
    Router::new()
        .route("/api/v1/reports", get(catalog_handler::<S>))
        .route("/api/v1/reports/refresh", post(refresh_handler::<S>))
        .route("/api/v1/reports/:report_type", get(view_handler::<S>))
        .route(
            "/api/v1/reports/:report_type/export",
            get(export_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

pub(crate) async fn catalog_handler<S>(State(service): State<Arc<ReportService<S>>>) -> Response
where
    S: ReportDataSource + 'static,
{
    (StatusCode::OK, Json(service.catalog())).into_response()
}

pub(crate) async fn view_handler<S>(
    State(service): State<Arc<ReportService<S>>>,
    Path(report_type): Path<String>,
) -> Result<Response, AppError>
where
    S: ReportDataSource + 'static,
{
    let report: ReportType = report_type.parse()?;
    let view = service.view(report)?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<ReportService<S>>>,
    Path(report_type): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError>
where
    S: ReportDataSource + 'static,
{
    let report: ReportType = report_type.parse()?;
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let export = service.export(report, date)?;

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", export.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response())
}

pub(crate) async fn refresh_handler<S>(
    State(service): State<Arc<ReportService<S>>>,
) -> Result<Response, AppError>
where
    S: ReportDataSource + 'static,
{
    let view = service.refresh()?;
    Ok((StatusCode::OK, Json(view)).into_response())
}
