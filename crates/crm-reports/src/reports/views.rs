use super::domain::{ReportType, StageName};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Currency,
    Count,
    Percent,
}

/// One display-ready figure: raw value plus its rendered text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayMetric {
    pub key: String,
    pub label: String,
    pub kind: MetricKind,
    pub value: f64,
    pub formatted_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// Bar height relative to the tallest bar, 0-100.
    pub height_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStageView {
    pub stage: StageName,
    pub stage_label: &'static str,
    pub accent: &'static str,
    pub count: u64,
    pub value: u64,
    pub formatted_value: String,
    pub share_pct: f64,
    pub formatted_share: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportTypeView {
    pub id: ReportType,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<ReportType> for ReportTypeView {
    fn from(report: ReportType) -> Self {
        Self {
            id: report,
            label: report.label(),
            description: report.description(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub report_type: ReportType,
    pub label: &'static str,
    pub description: &'static str,
    pub metrics: Vec<DisplayMetric>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chart: Vec<ChartBar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pipeline: Vec<PipelineStageView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

/// Export payload handed to whatever performs the download or file write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportExport {
    pub report_type: ReportType,
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}
