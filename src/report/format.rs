//! Formatted terminal output.
//!
//! Formatting lives in one place so the engine stays free of presentation
//! concerns and output changes stay localized.

use chrono::NaiveDate;

use crate::domain::{BurndownInput, BurndownSeries, ResampleConfig, Resampling, SeriesSelector};
use crate::report::{row_date, row_totals, series_stats, survival_ratio};

/// Summary of one resampled series (span, resolution, shape, survival).
pub fn format_run_summary(
    selector: &SeriesSelector,
    input: &BurndownInput,
    resampling: Resampling,
    series: &BurndownSeries,
    row_dates: &[NaiveDate],
    config: &ResampleConfig,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== burndown - {selector} ===\n"));
    match (row_dates.first(), row_dates.last()) {
        (Some(first), Some(last)) => {
            out.push_str(&format!("Span: {first} .. {last}\n"));
        }
        _ => out.push_str("Span: -\n"),
    }
    out.push_str(&format!(
        "Resampling: {} (granularity={}d, sampling={}d)\n",
        resampling.display_name(),
        config.granularity,
        config.sampling,
    ));
    out.push_str(&format!(
        "Input: {} samples x {} bands\n",
        input.data.len(),
        input.data.first().map(Vec::len).unwrap_or(0),
    ));

    match series_stats(series) {
        Some(stats) => {
            out.push_str(&format!("Output: {} rows x {} buckets\n", stats.rows, stats.buckets));
            let peak_at = row_date(row_dates, stats.peak_row)
                .map(|d| d.to_string())
                .unwrap_or_else(|| format!("row {}", stats.peak_row));
            out.push_str(&format!(
                "Surviving lines: {:.1} at end | peak {:.1} on {}",
                stats.final_total, stats.peak_total, peak_at
            ));
            if let Some(ratio) = survival_ratio(&stats) {
                out.push_str(&format!(" ({ratio:.1}% of peak)"));
            }
            out.push('\n');
        }
        None => out.push_str("Output: empty\n"),
    }

    out
}

/// Table of the last `last_n` rows: date, total, then one column per bucket.
pub fn format_table(series: &BurndownSeries, row_dates: &[NaiveDate], last_n: usize) -> String {
    let mut out = String::new();
    if series.data.is_empty() || last_n == 0 {
        return out;
    }

    let keys: Vec<String> = series.keys.iter().map(|k| k.to_string()).collect();
    let widths: Vec<usize> = keys.iter().map(|k| k.len().max(10)).collect();

    out.push_str(&format!("{:<10} {:>12}", "date", "total"));
    for (key, &w) in keys.iter().zip(&widths) {
        out.push_str(&format!(" {key:>w$}"));
    }
    out.push('\n');

    let totals = row_totals(series);
    let first = series.data.len().saturating_sub(last_n);
    for (idx, row) in series.data.iter().enumerate().skip(first) {
        let date = row_date(row_dates, idx)
            .map(|d| d.to_string())
            .unwrap_or_else(|| idx.to_string());
        out.push_str(&format!("{date:<10} {:>12.1}", totals[idx]));
        for (v, &w) in row.iter().zip(&widths) {
            out.push_str(&format!(" {v:>w$.1}"));
        }
        out.push('\n');
    }

    out
}
