use crate::config::ConfigError;
use crate::crm::{CrmError, StoreError};
use crate::reports::domain::UnknownReportType;
use crate::reports::ReportServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Report(ReportServiceError),
    Crm(CrmError),
    UnknownReport(UnknownReportType),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::Crm(err) => write!(f, "record error: {}", err),
            AppError::UnknownReport(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::Crm(err) => Some(err),
            AppError::UnknownReport(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnknownReport(_) => StatusCode::NOT_FOUND,
            AppError::Crm(
                CrmError::MissingField(_)
                | CrmError::InvalidValue { .. }
                | CrmError::UnknownContact(_)
                | CrmError::UnknownDeal(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Crm(
                CrmError::UnknownActivity(_) | CrmError::Store(StoreError::NotFound),
            ) => StatusCode::NOT_FOUND,
            AppError::Crm(CrmError::Store(StoreError::Conflict)) => StatusCode::CONFLICT,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Report(_)
            | AppError::Crm(CrmError::Store(StoreError::Unavailable(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ReportServiceError> for AppError {
    fn from(value: ReportServiceError) -> Self {
        Self::Report(value)
    }
}

impl From<CrmError> for AppError {
    fn from(value: CrmError) -> Self {
        Self::Crm(value)
    }
}

impl From<UnknownReportType> for AppError {
    fn from(value: UnknownReportType) -> Self {
        Self::UnknownReport(value)
    }
}
