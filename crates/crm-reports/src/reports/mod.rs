//! Report aggregation: display metrics, chart projections and CSV export
//! over a metrics snapshot supplied by a [`ReportDataSource`].

pub mod domain;
pub mod export;
pub mod fixtures;
pub mod format;
pub mod metrics;
pub mod router;
pub mod service;
pub mod source;
pub mod views;

pub use domain::{MetricsSnapshot, PipelineStage, ReportSeries, ReportType, StageName};
pub use export::{build_export, export_file_name, to_csv, ExportError};
pub use metrics::{build_view, compute_display_metrics, display_metrics_for_key};
pub use router::report_router;
pub use service::{ReportService, ReportServiceError};
pub use source::{InMemoryReportSource, ReportDataSource, SourceError};
pub use views::{DisplayMetric, ReportExport, ReportView};
