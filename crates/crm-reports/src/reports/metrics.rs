use super::domain::{MetricsSnapshot, PipelineMetrics, ReportSeries, ReportType, SeriesPoint};
use super::format::{format_count, format_currency, format_percent, round_half_away};
use super::views::{ChartBar, DisplayMetric, MetricKind, PipelineStageView, ReportView};

/// Display metrics for a report. Pure: the snapshot is only read.
pub fn compute_display_metrics(
    report: ReportType,
    snapshot: &MetricsSnapshot,
) -> Vec<DisplayMetric> {
    match report {
        ReportType::Sales => {
            let sales = &snapshot.sales;
            vec![
                currency("total_revenue", "Total Revenue", sales.total_revenue),
                currency("monthly_revenue", "This Month", sales.monthly_revenue),
                percent("growth", "Revenue Growth", sales.growth),
                count("deals", "Total Deals", sales.deals),
                currency("avg_deal_size", "Avg Deal Size", sales.avg_deal_size),
                percent("conversion_rate", "Conversion Rate", sales.conversion_rate),
            ]
        }
        ReportType::Contacts => {
            let contacts = &snapshot.contacts;
            vec![
                count("total", "Total Contacts", contacts.total),
                count("new_this_month", "New This Month", contacts.new_this_month),
                count("active", "Active", contacts.active),
                count("prospects", "Prospects", contacts.prospects),
                count("inactive", "Inactive", contacts.inactive),
            ]
        }
        ReportType::Pipeline => {
            let pipeline = &snapshot.pipeline;
            let mut metrics = Vec::with_capacity(1 + pipeline.stages.len() * 3);
            metrics.push(currency(
                "total_value",
                "Total Pipeline Value",
                pipeline.total_value as f64,
            ));
            for stage in &pipeline.stages {
                let key = stage.name.key();
                let label = stage.name.label();
                metrics.push(count(
                    &format!("{key}_count"),
                    &format!("{label} Deals"),
                    stage.count,
                ));
                metrics.push(currency(
                    &format!("{key}_value"),
                    &format!("{label} Value"),
                    stage.value as f64,
                ));
                metrics.push(percent(
                    &format!("{key}_share"),
                    &format!("{label} Share"),
                    pipeline.share_of_total(stage),
                ));
            }
            metrics
        }
        ReportType::Activity => {
            let activity = &snapshot.activity;
            vec![
                count("tasks_completed", "Tasks Completed", activity.tasks_completed),
                count("calls_made", "Calls Made", activity.calls_made),
                count("meetings_held", "Meetings Held", activity.meetings_held),
            ]
        }
    }
}

/// String-keyed entry point. An unrecognised report key yields no metrics.
pub fn display_metrics_for_key(report: &str, snapshot: &MetricsSnapshot) -> Vec<DisplayMetric> {
    match ReportType::from_key(report) {
        Some(report) => compute_display_metrics(report, snapshot),
        None => {
            tracing::debug!(report, "no metrics for unknown report type");
            Vec::new()
        }
    }
}

pub fn chart_bars(points: &[SeriesPoint]) -> Vec<ChartBar> {
    let max = points
        .iter()
        .map(|point| point.value)
        .fold(0.0_f64, f64::max);

    points
        .iter()
        .map(|point| ChartBar {
            label: point.label.clone(),
            value: point.value,
            height_pct: if max > 0.0 {
                point.value / max * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

pub fn pipeline_stage_views(pipeline: &PipelineMetrics) -> Vec<PipelineStageView> {
    pipeline
        .stages
        .iter()
        .map(|stage| {
            let share = pipeline.share_of_total(stage);
            PipelineStageView {
                stage: stage.name,
                stage_label: stage.name.label(),
                accent: stage.name.accent(),
                count: stage.count,
                value: stage.value,
                formatted_value: format_currency(stage.value as f64),
                share_pct: round_half_away(share, 1),
                formatted_share: format_percent(share, 1),
            }
        })
        .collect()
}

pub fn build_view(
    report: ReportType,
    snapshot: &MetricsSnapshot,
    series: &ReportSeries,
) -> ReportView {
    let (chart, pipeline) = match report {
        ReportType::Sales | ReportType::Contacts => {
            (chart_bars(&series.points(report)), Vec::new())
        }
        ReportType::Pipeline => (Vec::new(), pipeline_stage_views(&snapshot.pipeline)),
        ReportType::Activity => (Vec::new(), Vec::new()),
    };

    let insight = match report {
        ReportType::Activity => Some(productivity_insight(snapshot.activity.productivity_change)),
        _ => None,
    };

    ReportView {
        report_type: report,
        label: report.label(),
        description: report.description(),
        metrics: compute_display_metrics(report, snapshot),
        chart,
        pipeline,
        insight,
    }
}

fn productivity_insight(change: f64) -> String {
    let direction = if change >= 0.0 { "up" } else { "down" };
    format!(
        "Team productivity is {direction} {}% this month.",
        round_half_away(change.abs(), 1)
    )
}

fn currency(key: &str, label: &str, value: f64) -> DisplayMetric {
    DisplayMetric {
        key: key.to_string(),
        label: label.to_string(),
        kind: MetricKind::Currency,
        value,
        formatted_value: format_currency(value),
    }
}

fn count(key: &str, label: &str, value: u64) -> DisplayMetric {
    DisplayMetric {
        key: key.to_string(),
        label: label.to_string(),
        kind: MetricKind::Count,
        value: value as f64,
        formatted_value: format_count(value),
    }
}

fn percent(key: &str, label: &str, value: f64) -> DisplayMetric {
    DisplayMetric {
        key: key.to_string(),
        label: label.to_string(),
        kind: MetricKind::Percent,
        value,
        formatted_value: format_percent(value, 1),
    }
}
