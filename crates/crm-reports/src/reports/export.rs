use super::domain::{ContactGrowthPoint, PipelineStage, ReportSeries, ReportType};
use super::fixtures::ACTIVITY_EXPORT_ROWS;
use super::format::format_percent;
use super::views::ReportExport;
use chrono::NaiveDate;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer: {0}")]
    Flush(std::io::Error),
    #[error("CSV output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// `{report}-report-{YYYY-MM-DD}.csv`
pub fn export_file_name(report: ReportType, date: NaiveDate) -> String {
    format!("{}-report-{}.csv", report.slug(), date.format("%Y-%m-%d"))
}

/// Header line plus one row per series point or stage, `\n`-separated, no trailing newline.
pub fn to_csv(
    report: ReportType,
    series: &ReportSeries,
    stages: &[PipelineStage],
) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    match report {
        ReportType::Sales => {
            writer.write_record(["Month", "Revenue", "Deals", "Avg Deal Size"])?;
            for point in &series.sales_trend {
                writer.write_record([
                    point.month.clone(),
                    point.revenue.to_string(),
                    point.deals.to_string(),
                    point.average_deal_size().to_string(),
                ])?;
            }
        }
        ReportType::Contacts => {
            writer.write_record(["Month", "Total Contacts", "New Contacts", "Growth Rate"])?;
            let mut previous: Option<&ContactGrowthPoint> = None;
            for point in &series.contact_growth {
                let (delta, growth) = contact_change(previous, point);
                writer.write_record([point.month.clone(), point.contacts.to_string(), delta, growth])?;
                previous = Some(point);
            }
        }
        ReportType::Pipeline => {
            writer.write_record(["Stage", "Deal Count", "Total Value", "Avg Value"])?;
            for stage in stages {
                writer.write_record([
                    stage.name.key().to_string(),
                    stage.count.to_string(),
                    stage.value.to_string(),
                    stage.average_value().to_string(),
                ])?;
            }
        }
        ReportType::Activity => {
            writer.write_record(["Date", "Tasks Completed", "Calls Made", "Meetings Held"])?;
            for (date, tasks, calls, meetings) in ACTIVITY_EXPORT_ROWS {
                writer.write_record([
                    date.to_string(),
                    tasks.to_string(),
                    calls.to_string(),
                    meetings.to_string(),
                ])?;
            }
        }
    }

    let bytes = writer.into_inner().map_err(|err| {
        ExportError::Flush(std::io::Error::new(err.error().kind(), err.error().to_string()))
    })?;
    let mut body = String::from_utf8(bytes)?;
    if body.ends_with('\n') {
        body.pop();
    }
    Ok(body)
}

/// Builds the downloadable payload for `report` as of `date`.
pub fn build_export(
    report: ReportType,
    series: &ReportSeries,
    stages: &[PipelineStage],
    date: NaiveDate,
) -> Result<ReportExport, ExportError> {
    Ok(ReportExport {
        report_type: report,
        file_name: export_file_name(report, date),
        content_type: CSV_CONTENT_TYPE,
        body: to_csv(report, series, stages)?,
    })
}

// First row has no predecessor: `0` and `0%`.
fn contact_change(
    previous: Option<&ContactGrowthPoint>,
    current: &ContactGrowthPoint,
) -> (String, String) {
    let Some(previous) = previous else {
        return ("0".to_string(), "0%".to_string());
    };

    let delta = current.contacts as i64 - previous.contacts as i64;
    let growth = if previous.contacts == 0 {
        0.0
    } else {
        delta as f64 / previous.contacts as f64 * 100.0
    };

    (delta.to_string(), format_percent(growth, 1))
}
