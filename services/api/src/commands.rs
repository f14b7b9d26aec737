use crate::infra::{parse_date, parse_report_type};
use chrono::{Local, NaiveDate};
use clap::Args;
use crm_reports::config::AppConfig;
use crm_reports::crm::{CrmService, CrmStore, InMemoryCrmStore};
use crm_reports::error::AppError;
use crm_reports::reports::format::{format_count, format_currency};
use crm_reports::reports::{
    InMemoryReportSource, ReportExport, ReportService, ReportType, ReportView,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportShowArgs {
    /// Report to render: sales, contacts, pipeline, or activity
    #[arg(long = "type", value_parser = parse_report_type)]
    pub(crate) report: ReportType,
}

#[derive(Args, Debug)]
pub(crate) struct ReportExportArgs {
    /// Report to export: sales, contacts, pipeline, or activity
    #[arg(long = "type", value_parser = parse_report_type)]
    pub(crate) report: ReportType,
    /// Directory for the CSV file (defaults to CRM_EXPORT_DIR)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Date stamped into the file name (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the CSV instead of writing a file
    #[arg(long)]
    pub(crate) stdout: bool,
}

fn report_service() -> ReportService<InMemoryReportSource> {
    ReportService::new(Arc::new(InMemoryReportSource::default()))
}

pub(crate) fn run_report_show(args: ReportShowArgs) -> Result<(), AppError> {
    let view = report_service().view(args.report)?;
    for line in report_lines(&view) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_report_export(args: ReportExportArgs) -> Result<(), AppError> {
    let ReportExportArgs {
        report,
        out_dir,
        today,
        stdout,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let export = report_service().export(report, today)?;

    if stdout {
        println!("{}", export.body);
        return Ok(());
    }

    let out_dir = match out_dir {
        Some(dir) => dir,
        None => AppConfig::load()?.export.output_dir,
    };
    let path = write_export(&export, &out_dir)?;
    println!(
        "Exported {} to {}",
        export.report_type.label(),
        path.display()
    );
    Ok(())
}

pub(crate) fn run_records() -> Result<(), AppError> {
    let service = CrmService::new(Arc::new(InMemoryCrmStore::seeded()));
    for line in record_lines(&service)? {
        println!("{line}");
    }
    Ok(())
}

/// Writes the export body under `dir`, creating the directory when needed.
pub(crate) fn write_export(export: &ReportExport, dir: &Path) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&export.file_name);
    fs::write(&path, export.body.as_bytes())?;
    Ok(path)
}

pub(crate) fn report_lines(view: &ReportView) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", view.label, view.description)];

    lines.push("Metrics:".to_string());
    for metric in &view.metrics {
        lines.push(format!("  - {}: {}", metric.label, metric.formatted_value));
    }

    if !view.chart.is_empty() {
        lines.push("Trend:".to_string());
        for bar in &view.chart {
            let value = match view.report_type {
                ReportType::Sales => format_currency(bar.value),
                _ => format_count(bar.value.round() as u64),
            };
            lines.push(format!(
                "  - {}: {} ({:.0}% of peak)",
                bar.label, value, bar.height_pct
            ));
        }
    }

    if !view.pipeline.is_empty() {
        lines.push("Pipeline stages:".to_string());
        for stage in &view.pipeline {
            lines.push(format!(
                "  - {}: {} deals | {} | {}",
                stage.stage_label,
                format_count(stage.count),
                stage.formatted_value,
                stage.formatted_share
            ));
        }
    }

    if let Some(insight) = &view.insight {
        lines.push(format!("Insight: {insight}"));
    }

    lines
}

pub(crate) fn record_lines<S>(service: &CrmService<S>) -> Result<Vec<String>, AppError>
where
    S: CrmStore + 'static,
{
    let mut lines = vec!["Contacts:".to_string()];
    for contact in service.contacts()? {
        let company = contact
            .company
            .as_deref()
            .map(|company| format!(" @ {company}"))
            .unwrap_or_default();
        lines.push(format!(
            "  - {} <{}> [{}]{}",
            contact.full_name(),
            contact.email,
            contact.status.label(),
            company
        ));
    }

    lines.push("Deals:".to_string());
    for deal in service.deals()? {
        lines.push(format!(
            "  - {}: {} | {} | {}% | {}",
            deal.title,
            format_currency(deal.value),
            deal.stage.label(),
            deal.probability,
            service.contact_name(&deal.contact_id)?
        ));
    }

    lines.push("Activities:".to_string());
    for activity in service.activities()? {
        let mark = if activity.completed { "x" } else { " " };
        lines.push(format!(
            "  - [{mark}] {}: {} ({})",
            activity.kind.label(),
            activity.subject,
            service.contact_name(&activity.contact_id)?
        ));
    }

    let pipeline = service.pipeline_from_deals()?;
    lines.push(format!(
        "Pipeline from deals: {}",
        format_currency(pipeline.total_value as f64)
    ));
    for stage in &pipeline.stages {
        lines.push(format!(
            "  - {}: {} deals | {}",
            stage.name.label(),
            stage.count,
            format_currency(stage.value as f64)
        ));
    }

    Ok(lines)
}
