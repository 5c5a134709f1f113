//! Chart-facing resampling entry points.
//!
//! `to_months` / `to_years` run the full engine:
//! epoch seconds -> calendar boundaries -> daily interpolation -> bucket sums -> transpose.
//!
//! The output is row-major with one row per evaluation day and one column per
//! bucket of cohort creation dates, which is what a stacked-area chart consumes.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::domain::{BucketKey, BurndownInput, BurndownSeries, Resampling};
use crate::error::BurndownError;
use crate::math::{
    BucketKind, SurvivalMatrix, boundaries, datetime_from_epoch, dates_from_epoch, to_rows,
    whole_months_between, whole_years_between,
};
use crate::resample::aggregate::aggregate;
use crate::resample::interpolate::{interpolate, validate_resolution};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Aggregate cohorts into calendar-month buckets.
pub fn to_months(
    input: &BurndownInput,
    granularity: usize,
    sampling: usize,
) -> Result<BurndownSeries, BurndownError> {
    resample_calendar(input, BucketKind::Month, granularity, sampling)
}

/// Aggregate cohorts into calendar-year buckets.
pub fn to_years(
    input: &BurndownInput,
    granularity: usize,
    sampling: usize,
) -> Result<BurndownSeries, BurndownError> {
    resample_calendar(input, BucketKind::Year, granularity, sampling)
}

/// Pass the recorded bands through unchanged, labelled with their start dates.
pub fn to_raw(input: &BurndownInput, granularity: usize) -> Result<BurndownSeries, BurndownError> {
    validate_resolution(granularity, 1)?;
    let (begin, _) = dates_from_epoch(input.begin, input.end)?;
    let matrix = SurvivalMatrix::from_sample_rows(&input.data)?;

    let keys = (0..matrix.nrows())
        .map(|band| BucketKey::Date(begin + Duration::days((band * granularity) as i64)))
        .collect();

    Ok(BurndownSeries {
        data: input.data.clone(),
        keys,
    })
}

/// Dispatch on a resolved resampling.
pub fn resample(
    input: &BurndownInput,
    resampling: Resampling,
    granularity: usize,
    sampling: usize,
) -> Result<BurndownSeries, BurndownError> {
    match resampling {
        Resampling::Year => to_years(input, granularity, sampling),
        Resampling::Month => to_months(input, granularity, sampling),
        Resampling::Raw => {
            // Raw rows are `sampling` days apart, so it must be valid here too.
            validate_resolution(granularity, sampling)?;
            to_raw(input, granularity)
        }
    }
}

/// Calendar date of each output row.
///
/// Calendar resamplings produce one row per day from `begin`; raw output keeps one
/// row per sample, `sampling` days apart.
pub fn row_dates(
    begin: i64,
    resampling: Resampling,
    rows: usize,
    sampling: usize,
) -> Result<Vec<NaiveDate>, BurndownError> {
    validate_resolution(1, sampling)?;
    let start = datetime_from_epoch(begin)
        .ok_or_else(|| BurndownError::InvalidInterval {
            begin: begin.to_string(),
            end: "-".to_string(),
        })?
        .date();
    let step = match resampling {
        Resampling::Raw => sampling,
        Resampling::Year | Resampling::Month => 1,
    };
    Ok((0..rows)
        .map(|r| start + Duration::days((r * step) as i64))
        .collect())
}

/// Pick a bucket size from the span of the history.
///
/// - at least 3 whole years: `Year`
/// - strictly between 3 and 36 whole months: `Month`
/// - otherwise: `Raw`
pub fn choose_default_resampling(begin: i64, end: i64) -> Resampling {
    let (Some(b), Some(e)) = (datetime_from_epoch(begin), datetime_from_epoch(end)) else {
        return Resampling::Raw;
    };

    if whole_years_between(b, e) >= 3 {
        return Resampling::Year;
    }
    let months = whole_months_between(b, e);
    if months > 3 && months < 36 {
        return Resampling::Month;
    }
    Resampling::Raw
}

fn resample_calendar(
    input: &BurndownInput,
    kind: BucketKind,
    granularity: usize,
    sampling: usize,
) -> Result<BurndownSeries, BurndownError> {
    validate_resolution(granularity, sampling)?;
    let (begin, end) = dates_from_epoch(input.begin, input.end)?;
    let bounds = boundaries(kind, begin, end)?;

    let matrix = SurvivalMatrix::from_sample_rows(&input.data)?;
    let daily = interpolate(&matrix, granularity, sampling)?;
    let aggregated = aggregate(&daily, begin, &bounds)?;

    debug!(
        ?kind,
        %begin,
        %end,
        buckets = bounds.len() - 1,
        "resampled survival history"
    );

    let keys = bounds[..bounds.len() - 1]
        .iter()
        .map(|&d| bucket_key(kind, d))
        .collect();

    Ok(BurndownSeries {
        data: to_rows(&aggregated.transpose()),
        keys,
    })
}

fn bucket_key(kind: BucketKind, date: NaiveDate) -> BucketKey {
    match kind {
        BucketKind::Month => {
            BucketKey::Label(format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year()))
        }
        BucketKind::Year => BucketKey::Year(date.year()),
    }
}
