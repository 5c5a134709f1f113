//! Shared domain types.
//!
//! These types are serializable so they can be:
//!
//! - read from burndown JSON produced by the analysis server
//! - handed to the resampling engine
//! - exported as chart-ready JSON/CSV

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default number of days represented by one cohort band.
pub const DEFAULT_GRANULARITY: usize = 30;

/// Default number of days represented by one sample.
pub const DEFAULT_SAMPLING: usize = 30;

/// A single survival history as consumed by the resampling engine.
///
/// `data` is in wire orientation: one row per sample, one column per cohort band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownInput {
    /// Epoch seconds of the first analysed commit.
    pub begin: i64,
    /// Epoch seconds of the last analysed commit.
    pub end: i64,
    pub data: Vec<Vec<f64>>,
}

/// Chart-ready output: one row per evaluation day, one column per bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownSeries {
    pub data: Vec<Vec<f64>>,
    pub keys: Vec<BucketKey>,
}

/// Label of one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketKey {
    /// Year buckets are labelled with the bare year.
    Year(i32),
    /// Raw bands are labelled with their start date.
    Date(NaiveDate),
    /// Month buckets are labelled `"Apr 2017"`.
    Label(String),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Year(y) => write!(f, "{y}"),
            BucketKey::Date(d) => write!(f, "{d}"),
            BucketKey::Label(s) => f.write_str(s),
        }
    }
}

/// Requested resampling.
///
/// `Auto` means: pick from the span of the history (see
/// `resample::choose_default_resampling`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResampleMode {
    Auto,
    Year,
    Month,
    Raw,
}

/// Concrete resampling actually used after resolving `ResampleMode::Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resampling {
    Year,
    Month,
    /// No calendar aggregation: the bands as recorded.
    Raw,
}

impl Resampling {
    pub fn display_name(self) -> &'static str {
        match self {
            Resampling::Year => "year",
            Resampling::Month => "month",
            Resampling::Raw => "raw",
        }
    }
}

impl ResampleMode {
    pub fn to_resampling(self) -> Option<Resampling> {
        match self {
            ResampleMode::Auto => None,
            ResampleMode::Year => Some(Resampling::Year),
            ResampleMode::Month => Some(Resampling::Month),
            ResampleMode::Raw => Some(Resampling::Raw),
        }
    }
}

/// Which history of a report to resample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesSelector {
    /// The whole repository.
    Project,
    /// Lines attributed to one developer (`person:<name>`).
    Person(String),
    /// Lines of one file (`file:<path>`).
    File(String),
}

impl fmt::Display for SeriesSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesSelector::Project => f.write_str("project"),
            SeriesSelector::Person(name) => write!(f, "person:{name}"),
            SeriesSelector::File(path) => write!(f, "file:{path}"),
        }
    }
}

impl FromStr for SeriesSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "project" {
            return Ok(SeriesSelector::Project);
        }
        match s.split_once(':') {
            Some(("person", name)) if !name.is_empty() => Ok(SeriesSelector::Person(name.to_string())),
            Some(("file", path)) if !path.is_empty() => Ok(SeriesSelector::File(path.to_string())),
            _ => Err(format!(
                "invalid series '{s}' (expected 'project', 'person:<name>' or 'file:<path>')"
            )),
        }
    }
}

/// Payload of the analysis server's burndown endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    pub begin: i64,
    pub end: i64,
    /// Whole-repository history (samples × bands).
    #[serde(default)]
    pub project: Vec<Vec<f64>>,
    /// Per-file histories keyed by path.
    #[serde(default, rename = "filesData")]
    pub files_data: BTreeMap<String, Vec<Vec<f64>>>,
    /// Per-developer histories, parallel to `people_list`.
    #[serde(default, rename = "peopleData")]
    pub people_data: Vec<Vec<Vec<f64>>>,
    #[serde(default, rename = "peopleList")]
    pub people_list: Vec<String>,
}

/// Response envelope of the analysis server (`{data, error}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    #[serde(default)]
    pub data: Option<HistoryData>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct ResampleConfig {
    pub input: PathBuf,
    pub mode: ResampleMode,
    pub granularity: usize,
    pub sampling: usize,
    pub series: Vec<SeriesSelector>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Number of trailing days listed in the terminal table.
    pub table_rows: usize,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_selector_parses_and_displays() {
        assert_eq!("project".parse::<SeriesSelector>(), Ok(SeriesSelector::Project));
        assert_eq!(
            "person:alice@example.com".parse::<SeriesSelector>(),
            Ok(SeriesSelector::Person("alice@example.com".to_string()))
        );
        assert_eq!(
            "file:src/a:b.rs".parse::<SeriesSelector>(),
            Ok(SeriesSelector::File("src/a:b.rs".to_string()))
        );
        assert!("person:".parse::<SeriesSelector>().is_err());
        assert!("folder:src".parse::<SeriesSelector>().is_err());
        assert_eq!(SeriesSelector::File("x.go".into()).to_string(), "file:x.go");
    }

    #[test]
    fn bucket_keys_serialize_untagged() {
        let keys = vec![
            BucketKey::Label("Apr 2017".to_string()),
            BucketKey::Year(2017),
            BucketKey::Date(NaiveDate::from_ymd_opt(2017, 4, 1).unwrap()),
        ];
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(json, r#"["Apr 2017",2017,"2017-04-01"]"#);

        let back: Vec<BucketKey> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, keys);
    }

    #[test]
    fn history_report_reads_server_field_names() {
        let json = r#"{
            "data": {
                "begin": 10, "end": 20,
                "project": [[1, 0], [1, 2]],
                "filesData": {"a.go": [[1]]},
                "peopleData": [[[3]]],
                "peopleList": ["alice"]
            },
            "error": ""
        }"#;
        let report: HistoryReport = serde_json::from_str(json).unwrap();
        let data = report.data.unwrap();
        assert_eq!(data.project, vec![vec![1.0, 0.0], vec![1.0, 2.0]]);
        assert_eq!(data.files_data["a.go"], vec![vec![1.0]]);
        assert_eq!(data.people_list, vec!["alice".to_string()]);
        assert_eq!(report.error.as_deref(), Some(""));
    }
}
