use super::domain::{MetricsSnapshot, ReportSeries};
use super::fixtures::{seed_series, seed_snapshot};
use rand::Rng;
use std::sync::RwLock;

/// Largest swing applied to monthly revenue by a refresh, in either direction.
pub const REFRESH_JITTER: f64 = 5_000.0;

/// Supplies the metrics and series the reports are computed from.
pub trait ReportDataSource: Send + Sync {
    fn snapshot(&self) -> Result<MetricsSnapshot, SourceError>;
    fn series(&self) -> Result<ReportSeries, SourceError>;
    /// Re-reads the underlying data and returns the new snapshot.
    fn refresh(&self) -> Result<MetricsSnapshot, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("report data unavailable: {0}")]
    Unavailable(String),
}

/// Fixture-backed source. Refresh nudges monthly revenue since there is nothing to re-fetch.
#[derive(Debug)]
pub struct InMemoryReportSource {
    snapshot: RwLock<MetricsSnapshot>,
    series: RwLock<ReportSeries>,
}

impl Default for InMemoryReportSource {
    fn default() -> Self {
        Self::new(seed_snapshot(), seed_series())
    }
}

impl InMemoryReportSource {
    pub fn new(snapshot: MetricsSnapshot, series: ReportSeries) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            series: RwLock::new(series),
        }
    }

    /// Replaces the snapshot with a copy whose monthly revenue moved by up to
    /// [`REFRESH_JITTER`]. Every other field is carried over unchanged.
    pub fn refresh_with<R: Rng>(&self, rng: &mut R) -> Result<MetricsSnapshot, SourceError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| SourceError::Unavailable("snapshot lock poisoned".to_string()))?;

        let mut next = guard.clone();
        next.sales.monthly_revenue += rng.gen_range(-REFRESH_JITTER..REFRESH_JITTER);
        *guard = next.clone();
        Ok(next)
    }
}

impl ReportDataSource for InMemoryReportSource {
    fn snapshot(&self) -> Result<MetricsSnapshot, SourceError> {
        self.snapshot
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SourceError::Unavailable("snapshot lock poisoned".to_string()))
    }

    fn series(&self) -> Result<ReportSeries, SourceError> {
        self.series
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SourceError::Unavailable("series lock poisoned".to_string()))
    }

    fn refresh(&self) -> Result<MetricsSnapshot, SourceError> {
        self.refresh_with(&mut rand::thread_rng())
    }
}
