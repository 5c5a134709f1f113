//! Burndown JSON ingest and series selection.
//!
//! Two document shapes are accepted:
//!
//! - bare: `{"begin": .., "end": .., "data": [[..]]}` (a single history)
//! - server envelope: `{"data": {"begin", "end", "project", "filesData",
//!   "peopleData", "peopleList"}, "error": ".."}`
//!
//! Both are normalized to `HistoryData`; a bare document only has a project history.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::domain::{BurndownInput, HistoryData, HistoryReport, SeriesSelector};
use crate::error::AppError;

/// Read and normalize a burndown JSON file.
pub fn load_history(path: &Path) -> Result<HistoryData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open burndown JSON '{}': {e}", path.display())))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid burndown JSON '{}': {e}", path.display())))?;

    let history = parse_history(value)?;
    info!(
        path = %path.display(),
        people = history.people_list.len(),
        files = history.files_data.len(),
        "loaded burndown history"
    );
    Ok(history)
}

/// Normalize an already-parsed JSON document.
pub fn parse_history(value: Value) -> Result<HistoryData, AppError> {
    if let Some(err) = value.get("error").and_then(Value::as_str) {
        if !err.is_empty() {
            return Err(AppError::new(2, format!("Analysis server reported an error: {err}")));
        }
    }
    if let Some(status) = value.get("status") {
        return Err(AppError::new(
            2,
            format!("Burndown report is not ready yet (status: {status})."),
        ));
    }

    let is_envelope = value.get("data").is_some_and(Value::is_object);
    if is_envelope {
        let report: HistoryReport = serde_json::from_value(value)
            .map_err(|e| AppError::new(2, format!("Invalid burndown report: {e}")))?;
        return report
            .data
            .ok_or_else(|| AppError::new(2, "Burndown report has no data."));
    }

    let input: BurndownInput = serde_json::from_value(value)
        .map_err(|e| AppError::new(2, format!("Invalid burndown history: {e}")))?;
    Ok(HistoryData {
        begin: input.begin,
        end: input.end,
        project: input.data,
        ..HistoryData::default()
    })
}

/// Extract the engine input for one series.
pub fn select_series(history: &HistoryData, selector: &SeriesSelector) -> Result<BurndownInput, AppError> {
    let data = match selector {
        SeriesSelector::Project => &history.project,
        SeriesSelector::Person(name) => {
            let idx = history
                .people_list
                .iter()
                .position(|p| p == name)
                .ok_or_else(|| AppError::new(2, format!("Unknown person '{name}'.")))?;
            history
                .people_data
                .get(idx)
                .ok_or_else(|| AppError::new(2, format!("No history recorded for person '{name}'.")))?
        }
        SeriesSelector::File(path) => history
            .files_data
            .get(path)
            .ok_or_else(|| AppError::new(2, format!("Unknown file '{path}'.")))?,
    };

    if data.is_empty() {
        return Err(AppError::new(2, format!("Series '{selector}' has no history.")));
    }

    Ok(BurndownInput {
        begin: history.begin,
        end: history.end,
        data: data.clone(),
    })
}

/// All series present in a history, project first, then people, then files.
pub fn list_series(history: &HistoryData) -> Vec<SeriesSelector> {
    let mut out = Vec::new();
    if !history.project.is_empty() {
        out.push(SeriesSelector::Project);
    }
    for (idx, name) in history.people_list.iter().enumerate() {
        if history.people_data.get(idx).is_some_and(|d| !d.is_empty()) {
            out.push(SeriesSelector::Person(name.clone()));
        }
    }
    out.extend(history.files_data.keys().cloned().map(SeriesSelector::File));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope() -> Value {
        json!({
            "data": {
                "begin": 1491004800,
                "end": 1496188800,
                "project": [[100, 0], [80, 50]],
                "filesData": {"main.go": [[10, 0], [8, 5]]},
                "peopleData": [[[60, 0], [50, 20]], []],
                "peopleList": ["alice", "bob"]
            },
            "error": ""
        })
    }

    #[test]
    fn parses_bare_history() {
        let h = parse_history(json!({"begin": 1, "end": 2, "data": [[1.5]]})).unwrap();
        assert_eq!(h.begin, 1);
        assert_eq!(h.project, vec![vec![1.5]]);
        assert!(h.people_list.is_empty());
        assert_eq!(list_series(&h), vec![SeriesSelector::Project]);
    }

    #[test]
    fn parses_server_envelope() {
        let h = parse_history(envelope()).unwrap();
        assert_eq!(h.end, 1496188800);
        assert_eq!(
            list_series(&h),
            vec![
                SeriesSelector::Project,
                SeriesSelector::Person("alice".to_string()),
                SeriesSelector::File("main.go".to_string()),
            ]
        );
    }

    #[test]
    fn surfaces_server_errors_and_pending_jobs() {
        let err = parse_history(json!({"data": null, "error": "repository not found"})).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("repository not found"));

        assert!(parse_history(json!({"status": "cloning"})).is_err());
        assert!(parse_history(json!({"begin": "x"})).is_err());
    }

    #[test]
    fn selects_series_by_kind() {
        let h = parse_history(envelope()).unwrap();

        let alice = select_series(&h, &SeriesSelector::Person("alice".into())).unwrap();
        assert_eq!(alice.data, vec![vec![60.0, 0.0], vec![50.0, 20.0]]);
        assert_eq!(alice.begin, 1491004800);

        let file = select_series(&h, &SeriesSelector::File("main.go".into())).unwrap();
        assert_eq!(file.data[1], vec![8.0, 5.0]);

        assert!(select_series(&h, &SeriesSelector::Person("bob".into())).is_err());
        assert!(select_series(&h, &SeriesSelector::Person("carol".into())).is_err());
        assert!(select_series(&h, &SeriesSelector::File("nope.go".into())).is_err());
    }
}
