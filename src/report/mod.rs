//! Reporting utilities: per-row totals, series statistics and formatted output.

pub mod format;

pub use format::*;

use chrono::NaiveDate;

use crate::domain::BurndownSeries;

/// Summary numbers of one resampled series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub rows: usize,
    pub buckets: usize,
    /// Surviving lines on the last output row.
    pub final_total: f64,
    /// Largest row total and the row it occurs on.
    pub peak_total: f64,
    pub peak_row: usize,
}

/// Total surviving lines per output row (sum over all buckets).
pub fn row_totals(series: &BurndownSeries) -> Vec<f64> {
    series.data.iter().map(|row| row.iter().sum()).collect()
}

/// Compute summary statistics; `None` for a series without rows.
pub fn series_stats(series: &BurndownSeries) -> Option<SeriesStats> {
    let totals = row_totals(series);
    let final_total = *totals.last()?;

    let mut peak_row = 0;
    for (idx, &t) in totals.iter().enumerate() {
        if t > totals[peak_row] {
            peak_row = idx;
        }
    }

    Some(SeriesStats {
        rows: series.data.len(),
        buckets: series.keys.len(),
        final_total,
        peak_total: totals[peak_row],
        peak_row,
    })
}

/// Share of the peak still alive at the end, in percent.
pub fn survival_ratio(stats: &SeriesStats) -> Option<f64> {
    (stats.peak_total > 0.0).then(|| 100.0 * stats.final_total / stats.peak_total)
}

/// Date of a row, if known.
pub fn row_date(row_dates: &[NaiveDate], row: usize) -> Option<NaiveDate> {
    row_dates.get(row).copied()
}
