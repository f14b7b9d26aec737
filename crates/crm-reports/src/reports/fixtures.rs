use super::domain::{
    ActivityMetrics, ContactGrowthPoint, ContactMetrics, MetricsSnapshot, PipelineMetrics,
    PipelineStage, ReportSeries, SalesMetrics, SalesTrendPoint, StageName,
};

/// Seed metrics shown before any refresh.
pub fn seed_snapshot() -> MetricsSnapshot {
    let stages = vec![
        PipelineStage::new(StageName::Lead, 45, 187_500),
        PipelineStage::new(StageName::Qualified, 32, 280_000),
        PipelineStage::new(StageName::Proposal, 28, 315_000),
        PipelineStage::new(StageName::Negotiation, 18, 234_000),
        PipelineStage::new(StageName::Closed, 33, 233_500),
    ];

    MetricsSnapshot {
        sales: SalesMetrics {
            total_revenue: 847_250.0,
            monthly_revenue: 125_430.0,
            deals: 156,
            avg_deal_size: 5_432.0,
            conversion_rate: 24.5,
            growth: 12.3,
        },
        contacts: ContactMetrics {
            total: 2_847,
            new_this_month: 234,
            active: 1_923,
            prospects: 678,
            inactive: 246,
            growth: 8.7,
        },
        pipeline: PipelineMetrics {
            total_value: 1_250_000,
            stages,
        },
        activity: ActivityMetrics {
            tasks_completed: 147,
            calls_made: 89,
            meetings_held: 34,
            productivity_change: 15.0,
        },
    }
}

/// Six months of seed chart data, January through June.
pub fn seed_series() -> ReportSeries {
    ReportSeries {
        sales_trend: vec![
            SalesTrendPoint::new("Jan", 85_000, 12),
            SalesTrendPoint::new("Feb", 92_000, 15),
            SalesTrendPoint::new("Mar", 78_000, 11),
            SalesTrendPoint::new("Apr", 105_000, 18),
            SalesTrendPoint::new("May", 125_430, 23),
            SalesTrendPoint::new("Jun", 110_000, 19),
        ],
        contact_growth: vec![
            ContactGrowthPoint::new("Jan", 2_156),
            ContactGrowthPoint::new("Feb", 2_298),
            ContactGrowthPoint::new("Mar", 2_401),
            ContactGrowthPoint::new("Apr", 2_589),
            ContactGrowthPoint::new("May", 2_734),
            ContactGrowthPoint::new("Jun", 2_847),
        ],
    }
}

/// Daily activity rows exported with the activity report. They are not derived from the snapshot.
pub(crate) const ACTIVITY_EXPORT_ROWS: [(&str, u32, u32, u32); 5] = [
    ("Jun 1", 25, 45, 12),
    ("Jun 2", 28, 38, 15),
    ("Jun 3", 22, 42, 8),
    ("Jun 4", 31, 51, 18),
    ("Jun 5", 27, 39, 11),
];
