use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four report tabs the dashboard can render and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Sales,
    Contacts,
    Pipeline,
    Activity,
}

impl ReportType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Sales, Self::Contacts, Self::Pipeline, Self::Activity]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Contacts => "contacts",
            Self::Pipeline => "pipeline",
            Self::Activity => "activity",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales Analytics",
            Self::Contacts => "Contact Metrics",
            Self::Pipeline => "Pipeline Analysis",
            Self::Activity => "Activity Reports",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Sales => "Revenue trends and deal performance",
            Self::Contacts => "Contact growth and engagement data",
            Self::Pipeline => "Deal pipeline and conversion rates",
            Self::Activity => "Task completion and team productivity",
        }
    }

    /// Lenient lookup used at string boundaries; unknown keys are not an error.
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|report| report.slug().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report type '{0}' (expected sales, contacts, pipeline, or activity)")]
pub struct UnknownReportType(pub String);

impl FromStr for ReportType {
    type Err = UnknownReportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownReportType(s.trim().to_string()))
    }
}

/// Pipeline stages in display order; deals move left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    Closed,
}

impl StageName {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Lead,
            Self::Qualified,
            Self::Proposal,
            Self::Negotiation,
            Self::Closed,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Closed => "closed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Closed => "Closed",
        }
    }

    /// Colour token the front end uses for the stage badge and progress bar.
    pub const fn accent(self) -> &'static str {
        match self {
            Self::Lead => "surface",
            Self::Qualified => "blue",
            Self::Proposal => "yellow",
            Self::Negotiation => "orange",
            Self::Closed => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesMetrics {
    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub deals: u64,
    pub avg_deal_size: f64,
    /// Percentage in the 0-100 range.
    pub conversion_rate: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMetrics {
    pub total: u64,
    pub new_this_month: u64,
    pub active: u64,
    pub prospects: u64,
    pub inactive: u64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub name: StageName,
    pub count: u64,
    pub value: u64,
}

impl PipelineStage {
    pub fn new(name: StageName, count: u64, value: u64) -> Self {
        Self { name, count, value }
    }

    /// Average deal value in the stage, `0` for an empty stage.
    pub fn average_value(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            (self.value as f64 / self.count as f64).round() as u64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetrics {
    pub total_value: u64,
    pub stages: Vec<PipelineStage>,
}

impl PipelineMetrics {
    pub fn stage_total(&self) -> u64 {
        self.stages.iter().map(|stage| stage.value).sum()
    }

    /// Whether `total_value` agrees with the per-stage values. Not enforced anywhere.
    pub fn is_consistent(&self) -> bool {
        self.stage_total() == self.total_value
    }

    /// Share of `total_value` held by a stage, in percent. Zero when the pipeline is empty.
    pub fn share_of_total(&self, stage: &PipelineStage) -> f64 {
        if self.total_value == 0 {
            0.0
        } else {
            stage.value as f64 / self.total_value as f64 * 100.0
        }
    }

    pub fn stage(&self, name: StageName) -> Option<&PipelineStage> {
        self.stages.iter().find(|stage| stage.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    pub tasks_completed: u64,
    pub calls_made: u64,
    pub meetings_held: u64,
    pub productivity_change: f64,
}

/// Point-in-time copy of every aggregate the reports read. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub sales: SalesMetrics,
    pub contacts: ContactMetrics,
    pub pipeline: PipelineMetrics,
    pub activity: ActivityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTrendPoint {
    pub month: String,
    pub revenue: u64,
    pub deals: u64,
}

impl SalesTrendPoint {
    pub fn new(month: impl Into<String>, revenue: u64, deals: u64) -> Self {
        Self {
            month: month.into(),
            revenue,
            deals,
        }
    }

    pub fn average_deal_size(&self) -> u64 {
        if self.deals == 0 {
            0
        } else {
            (self.revenue as f64 / self.deals as f64).round() as u64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactGrowthPoint {
    pub month: String,
    pub contacts: u64,
}

impl ContactGrowthPoint {
    pub fn new(month: impl Into<String>, contacts: u64) -> Self {
        Self {
            month: month.into(),
            contacts,
        }
    }
}

/// Chronological series backing the charts and exports. Order is the caller's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSeries {
    pub sales_trend: Vec<SalesTrendPoint>,
    pub contact_growth: Vec<ContactGrowthPoint>,
}

/// Generic `(label, value)` sample used for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl ReportSeries {
    /// Chart-ready points for the report, empty for reports without a time series.
    pub fn points(&self, report: ReportType) -> Vec<SeriesPoint> {
        match report {
            ReportType::Sales => self
                .sales_trend
                .iter()
                .map(|point| SeriesPoint {
                    label: point.month.clone(),
                    value: point.revenue as f64,
                })
                .collect(),
            ReportType::Contacts => self
                .contact_growth
                .iter()
                .map(|point| SeriesPoint {
                    label: point.month.clone(),
                    value: point.contacts as f64,
                })
                .collect(),
            ReportType::Pipeline | ReportType::Activity => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_type_parses_known_keys_case_insensitively() {
        assert_eq!(ReportType::from_key("sales"), Some(ReportType::Sales));
        assert_eq!(ReportType::from_key(" Pipeline "), Some(ReportType::Pipeline));
        assert_eq!(ReportType::from_key("revenue"), None);
        let err = "forecast".parse::<ReportType>().expect_err("unknown key");
        assert_eq!(err, UnknownReportType("forecast".to_string()));
    }

    #[test]
    fn empty_stage_averages_to_zero() {
        let stage = PipelineStage::new(StageName::Lead, 0, 4000);
        assert_eq!(stage.average_value(), 0);
        let point = SalesTrendPoint::new("X", 1000, 0);
        assert_eq!(point.average_deal_size(), 0);
    }

    #[test]
    fn share_of_total_is_zero_for_empty_pipeline() {
        let pipeline = PipelineMetrics {
            total_value: 0,
            stages: vec![PipelineStage::new(StageName::Closed, 3, 500)],
        };
        assert_eq!(pipeline.share_of_total(&pipeline.stages[0]), 0.0);
        assert!(!pipeline.is_consistent());
    }

    #[test]
    fn stage_order_matches_pipeline_flow() {
        let keys: Vec<_> = StageName::ordered().iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            ["lead", "qualified", "proposal", "negotiation", "closed"]
        );
    }
}
