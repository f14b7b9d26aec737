use chrono::NaiveDate;
use crm_reports::reports::ReportType;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_report_type(raw: &str) -> Result<ReportType, String> {
    raw.parse::<ReportType>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date(" 2024-06-30 "),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"))
        );
        assert!(parse_date("30/06/2024").is_err());
    }

    #[test]
    fn parse_report_type_lists_valid_choices_on_error() {
        assert_eq!(parse_report_type("Pipeline"), Ok(ReportType::Pipeline));
        let err = parse_report_type("forecast").expect_err("unknown type");
        assert!(err.contains("sales, contacts, pipeline, or activity"));
    }
}
