//! Calendar-bucket aggregation of a daily survival matrix.
//!
//! Rows of the daily matrix are cohort days; a bucket collects all cohort days
//! whose creation date falls in `[boundary(p), boundary(p+1))` by summing those
//! rows column-wise.

use chrono::NaiveDate;
use nalgebra::DMatrix;
use tracing::debug;

use crate::error::BurndownError;
use crate::math::{DailyMatrix, day_offset};

/// `buckets × evaluation days`.
pub type AggregatedMatrix = DMatrix<f64>;

/// Sum daily rows per bucket.
///
/// `begin` is the calendar date of daily row 0. Fails on empty, reversed or
/// out-of-range buckets instead of emitting zero rows.
pub fn aggregate(
    daily: &DailyMatrix,
    begin: NaiveDate,
    boundaries: &[NaiveDate],
) -> Result<AggregatedMatrix, BurndownError> {
    if boundaries.len() < 2 {
        return Err(BurndownError::TooFewBoundaries(boundaries.len()));
    }

    let rows = daily.nrows();
    let mut out = DMatrix::zeros(boundaries.len() - 1, daily.ncols());

    for (index, pair) in boundaries.windows(2).enumerate() {
        let start = day_offset(begin, pair[0]);
        let finish = day_offset(begin, pair[1]);
        if start < 0 || finish <= start {
            return Err(BurndownError::EmptyBucket {
                index,
                start,
                finish,
            });
        }

        let (start, finish) = (start as usize, finish as usize);
        if finish > rows {
            return Err(BurndownError::BucketOutOfRange {
                index,
                finish,
                rows,
            });
        }

        let sums = daily.as_matrix().rows(start, finish - start).row_sum();
        out.row_mut(index).copy_from(&sums);
    }

    debug!(
        buckets = out.nrows(),
        days = out.ncols(),
        "aggregated daily matrix into calendar buckets"
    );
    Ok(out)
}
