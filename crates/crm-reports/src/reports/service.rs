use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::ReportType;
use super::export::{build_export, ExportError};
use super::metrics::build_view;
use super::source::{ReportDataSource, SourceError};
use super::views::{ReportExport, ReportTypeView, ReportView};

/// Service composing a data source with the aggregation and export routines.
pub struct ReportService<S> {
    source: Arc<S>,
}

impl<S> ReportService<S>
where
    S: ReportDataSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn catalog(&self) -> Vec<ReportTypeView> {
        ReportType::ordered()
            .into_iter()
            .map(ReportTypeView::from)
            .collect()
    }

    pub fn view(&self, report: ReportType) -> Result<ReportView, ReportServiceError> {
        let snapshot = self.source.snapshot()?;
        let series = self.source.series()?;
        Ok(build_view(report, &snapshot, &series))
    }

    /// Exports the data as it stands right now; nothing is re-fetched first.
    pub fn export(
        &self,
        report: ReportType,
        date: NaiveDate,
    ) -> Result<ReportExport, ReportServiceError> {
        let snapshot = self.source.snapshot()?;
        let series = self.source.series()?;
        let export = build_export(report, &series, &snapshot.pipeline.stages, date)?;
        tracing::info!(
            report = %report,
            file = %export.file_name,
            bytes = export.body.len(),
            "report exported"
        );
        Ok(export)
    }

    /// Refreshes the source and returns the sales view computed from the new snapshot.
    pub fn refresh(&self) -> Result<ReportView, ReportServiceError> {
        let snapshot = self.source.refresh()?;
        let series = self.source.series()?;
        tracing::info!(
            monthly_revenue = snapshot.sales.monthly_revenue,
            "report data refreshed"
        );
        Ok(build_view(ReportType::Sales, &snapshot, &series))
    }
}

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
