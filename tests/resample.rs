use std::path::PathBuf;

use burndown_curves::app::pipeline::run_resample;
use burndown_curves::domain::{BucketKey, ResampleConfig, ResampleMode, Resampling, SeriesSelector};
use burndown_curves::io::{parse_history, select_series, write_series_csv};
use burndown_curves::math::{DailyMatrix, SurvivalMatrix};
use burndown_curves::resample::{aggregate, interpolate, to_months, to_years};
use chrono::NaiveDate;
use serde_json::json;

// 2017-04-01T00:00:00Z and 2017-05-31T00:00:00Z
const BEGIN: i64 = 1_491_004_800;
const END: i64 = 1_496_188_800;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn report() -> serde_json::Value {
    json!({
        "data": {
            "begin": BEGIN,
            "end": END,
            "project": [[100, 0], [80, 50]],
            "filesData": {"cmd/main.go": [[10, 0], [8, 5]]},
            "peopleData": [[[60, 0], [40, 30]]],
            "peopleList": ["alice"]
        },
        "error": ""
    })
}

#[test]
fn daily_buckets_at_day_30_and_60() {
    // Cohort-major: two 30-day bands sampled every 30 days.
    let survival = SurvivalMatrix::from_rows(&[vec![100.0, 80.0], vec![0.0, 50.0]]).unwrap();
    let daily = interpolate(&survival, 30, 30).unwrap();

    let bounds = [date(2017, 1, 1), date(2017, 1, 31), date(2017, 3, 2)];
    let buckets = aggregate(&daily, bounds[0], &bounds).unwrap();
    assert_eq!(buckets.shape(), (2, 60));

    assert!(close(buckets[(0, 29)], 100.0));
    assert!(close(buckets[(0, 59)], 80.0));
    assert!(close(buckets[(1, 29)], 0.0));
    assert!(close(buckets[(1, 59)], 50.0));
}

#[test]
fn aggregate_rejects_buckets_past_the_last_cohort() {
    let daily = DailyMatrix::zeros(10, 4);
    let bounds = [date(2020, 1, 1), date(2020, 1, 5), date(2020, 1, 20)];
    let err = aggregate(&daily, bounds[0], &bounds).unwrap_err();
    assert!(!err.is_input_error());
}

#[test]
fn envelope_to_month_chart() {
    let history = parse_history(report()).unwrap();
    let input = select_series(&history, &SeriesSelector::Project).unwrap();
    let chart = to_months(&input, 30, 30).unwrap();

    assert_eq!(chart.data.len(), 60);
    assert!(close(chart.data[29][0], 100.0));
    assert!(close(chart.data[59][0], 80.0));
    assert!(close(chart.data[59][1], 50.0));

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["keys"], json!(["Apr 2017", "May 2017"]));
    assert_eq!(json["data"].as_array().unwrap().len(), 60);
    assert_eq!(json["data"][0].as_array().unwrap().len(), 2);
}

#[test]
fn year_chart_keys_are_numbers() {
    let history = parse_history(report()).unwrap();
    let input = select_series(&history, &SeriesSelector::Person("alice".into())).unwrap();
    let chart = to_years(&input, 30, 30).unwrap();

    assert_eq!(chart.keys, vec![BucketKey::Year(2017)]);
    assert_eq!(serde_json::to_value(&chart.keys).unwrap(), json!([2017]));
    // One bucket holds both cohorts.
    assert!(close(chart.data[59][0], 70.0));
}

#[test]
fn server_error_is_an_input_error() {
    let err = parse_history(json!({"data": null, "error": "repository not found"})).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("repository not found"));
}

#[test]
fn pipeline_from_file_and_csv_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("burndown.json");
    std::fs::write(&input, serde_json::to_vec(&report()).unwrap()).unwrap();

    let config = ResampleConfig {
        input: PathBuf::from(&input),
        mode: ResampleMode::Month,
        granularity: 30,
        sampling: 30,
        series: vec![SeriesSelector::Project, SeriesSelector::File("cmd/main.go".into())],
        plot: false,
        plot_width: 60,
        plot_height: 10,
        table_rows: 5,
        export_json: None,
        export_csv: None,
    };
    let runs = run_resample(&config).unwrap();
    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|r| r.resampling == Resampling::Month));
    assert!(close(runs[1].series.data[59][0], 8.0));

    let csv_path = dir.path().join("project.csv");
    write_series_csv(&csv_path, &runs[0].series, &runs[0].row_dates).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 61);
    assert_eq!(lines[0], "date,total,Apr 2017,May 2017");
    assert_eq!(lines[60], "2017-05-30,130.0000,80.0000,50.0000");
}
