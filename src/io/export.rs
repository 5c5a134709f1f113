//! Export resampled series to JSON or CSV.
//!
//! JSON is the chart-ready `{data, keys}` document. CSV has one row per output row:
//! `date,total,<key1>,<key2>,…` so it opens directly in a spreadsheet.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::{BurndownSeries, SeriesSelector};
use crate::error::AppError;
use crate::report::row_totals;

/// Write a series as pretty-printed JSON.
pub fn write_series_json(path: &Path, series: &BurndownSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, series)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

/// Write a series as CSV, one line per output row.
pub fn write_series_csv(path: &Path, series: &BurndownSeries, row_dates: &[NaiveDate]) -> Result<(), AppError> {
    if row_dates.len() != series.data.len() {
        return Err(AppError::new(
            4,
            format!(
                "CSV export needs one date per row ({} dates for {} rows).",
                row_dates.len(),
                series.data.len()
            ),
        ));
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut header = vec!["date".to_string(), "total".to_string()];
    header.extend(series.keys.iter().map(|k| k.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let totals = row_totals(series);
    for ((row, date), total) in series.data.iter().zip(row_dates).zip(totals) {
        let mut record = vec![date.to_string(), format!("{total:.4}")];
        record.extend(row.iter().map(|v| format!("{v:.4}")));
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Export path for one of several series: the selector is spliced into the file
/// stem (`out.csv` -> `out.person-alice.csv`). A single series keeps `path` as is.
pub fn path_for_series(path: &Path, selector: &SeriesSelector, multiple: bool) -> PathBuf {
    if !multiple {
        return path.to_path_buf();
    }

    let tag: String = selector
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '_' { c } else { '-' })
        .collect();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "burndown".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{stem}.{tag}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{tag}"),
    };
    path.with_file_name(name)
}
