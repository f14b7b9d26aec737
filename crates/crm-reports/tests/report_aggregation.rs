use chrono::NaiveDate;
use crm_reports::reports::fixtures::{seed_series, seed_snapshot};
use crm_reports::reports::format::{format_currency, parse_currency};
use crm_reports::reports::source::InMemoryReportSource;
use crm_reports::reports::{
    build_export, build_view, compute_display_metrics, display_metrics_for_key, to_csv,
    ReportService, ReportType, StageName,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid export date")
}

#[test]
fn seeded_pipeline_value_matches_stage_sum() {
    let snapshot = seed_snapshot();
    assert!(snapshot.pipeline.is_consistent());
    assert_eq!(snapshot.pipeline.stage_total(), 1_250_000);

    let keys: Vec<_> = snapshot
        .pipeline
        .stages
        .iter()
        .map(|stage| stage.name)
        .collect();
    assert_eq!(keys, StageName::ordered().to_vec());
}

#[test]
fn sales_metrics_render_display_text() {
    let metrics = compute_display_metrics(ReportType::Sales, &seed_snapshot());
    let rendered: Vec<_> = metrics
        .iter()
        .map(|metric| (metric.key.as_str(), metric.formatted_value.as_str()))
        .collect();

    assert_eq!(
        rendered,
        vec![
            ("total_revenue", "$847,250"),
            ("monthly_revenue", "$125,430"),
            ("growth", "12.3%"),
            ("deals", "156"),
            ("avg_deal_size", "$5,432"),
            ("conversion_rate", "24.5%"),
        ]
    );
}

#[test]
fn pipeline_shares_cover_the_whole_pipeline() {
    let view = build_view(ReportType::Pipeline, &seed_snapshot(), &seed_series());
    assert_eq!(view.pipeline.len(), 5);

    let share_total: f64 = view.pipeline.iter().map(|stage| stage.share_pct).sum();
    assert!((share_total - 100.0).abs() < 0.5, "shares summed to {share_total}");

    let shares: Vec<_> = view
        .pipeline
        .iter()
        .map(|stage| stage.formatted_share.as_str())
        .collect();
    assert_eq!(shares, vec!["15.0%", "22.4%", "25.2%", "18.7%", "18.7%"]);
}

#[test]
fn string_keys_resolve_case_insensitively() {
    let snapshot = seed_snapshot();
    assert_eq!(
        display_metrics_for_key(" Contacts ", &snapshot),
        compute_display_metrics(ReportType::Contacts, &snapshot)
    );
    assert!(display_metrics_for_key("forecast", &snapshot).is_empty());
}

#[test]
fn sales_export_has_header_and_one_row_per_month() {
    let csv = to_csv(ReportType::Sales, &seed_series(), &[]).expect("csv");
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "Month,Revenue,Deals,Avg Deal Size");
    assert_eq!(lines[1], "Jan,85000,12,7083");
    assert_eq!(lines[2], "Feb,92000,15,6133");
    assert!(!csv.ends_with('\n'));
}

#[test]
fn activity_export_uses_daily_rows() {
    let snapshot = seed_snapshot();
    let export = build_export(
        ReportType::Activity,
        &seed_series(),
        &snapshot.pipeline.stages,
        export_date(),
    )
    .expect("export");

    assert_eq!(export.file_name, "activity-report-2024-06-30.csv");
    assert_eq!(export.content_type, "text/csv");
    let lines: Vec<_> = export.body.lines().collect();
    assert_eq!(lines[0], "Date,Tasks Completed,Calls Made,Meetings Held");
    assert_eq!(lines[1], "Jun 1,25,45,12");
    assert_eq!(lines.len(), 6);
}

#[test]
fn currency_formatting_round_trips_integral_amounts() {
    for amount in [0.0, 999.0, 1_000.0, 847_250.0, 1_250_000.0] {
        let rendered = format_currency(amount);
        assert_eq!(parse_currency(&rendered).expect("parse"), amount, "{rendered}");
    }
}

#[test]
fn refresh_only_moves_monthly_revenue() {
    let source = Arc::new(InMemoryReportSource::default());
    let before = seed_snapshot();

    let after = source
        .refresh_with(&mut StdRng::seed_from_u64(7))
        .expect("refresh");

    let drift = (after.sales.monthly_revenue - before.sales.monthly_revenue).abs();
    assert!(drift <= 5_000.0);
    assert_eq!(after.sales.total_revenue, before.sales.total_revenue);
    assert_eq!(after.contacts, before.contacts);
    assert_eq!(after.pipeline, before.pipeline);
    assert_eq!(after.activity, before.activity);

    let service = ReportService::new(source);
    let view = service.view(ReportType::Sales).expect("view");
    assert_eq!(view.metrics[0].formatted_value, "$847,250");
    let monthly = view
        .metrics
        .iter()
        .find(|metric| metric.key == "monthly_revenue")
        .expect("monthly revenue shown");
    assert_eq!(monthly.value, after.sales.monthly_revenue);
    assert_eq!(monthly.formatted_value, format_currency(after.sales.monthly_revenue));
}
