//! Calendar helpers: epoch conversion, bucket boundaries and day offsets.
//!
//! All calendar math is done in UTC on `chrono::NaiveDate`. Dropping the time of
//! day before generating boundaries guarantees every bucket spans at least one
//! whole day.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::error::BurndownError;

/// Calendar bucket size used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Month,
    Year,
}

/// Convert epoch seconds to a UTC timestamp.
pub fn datetime_from_epoch(secs: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// Convert an epoch-seconds interval to calendar dates, validating `end > begin`.
pub fn dates_from_epoch(begin: i64, end: i64) -> Result<(NaiveDate, NaiveDate), BurndownError> {
    let invalid = || BurndownError::InvalidInterval {
        begin: begin.to_string(),
        end: end.to_string(),
    };
    let b = datetime_from_epoch(begin).ok_or_else(invalid)?.date();
    let e = datetime_from_epoch(end).ok_or_else(invalid)?.date();
    if e <= b {
        return Err(invalid());
    }
    Ok((b, e))
}

/// Boundaries for the requested bucket kind.
pub fn boundaries(
    kind: BucketKind,
    begin: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<NaiveDate>, BurndownError> {
    match kind {
        BucketKind::Month => month_boundaries(begin, end),
        BucketKind::Year => year_boundaries(begin, end),
    }
}

/// `[begin, first-of-month…, end]`.
///
/// Every first-of-month `m` with `begin < m <= end` is included; `end` is
/// appended unless it already is the last boundary.
pub fn month_boundaries(begin: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, BurndownError> {
    ensure_ordered(begin, end)?;

    let mut out = vec![begin];
    let mut current = first_of_month(begin).checked_add_months(Months::new(1));
    while let Some(m) = current {
        if m > end {
            break;
        }
        out.push(m);
        current = m.checked_add_months(Months::new(1));
    }
    push_end(&mut out, end);
    Ok(out)
}

/// `[begin, Jan 1st of begin.year+1 ..= end.year, end]`.
pub fn year_boundaries(begin: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, BurndownError> {
    ensure_ordered(begin, end)?;

    let mut out = vec![begin];
    for year in (begin.year() + 1)..=end.year() {
        if let Some(d) = NaiveDate::from_ymd_opt(year, 1, 1) {
            out.push(d);
        }
    }
    push_end(&mut out, end);
    Ok(out)
}

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn day_offset(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Whole calendar months between two timestamps.
///
/// The raw month difference is reduced by one when the end falls earlier in its
/// month (day, then time of day) than the beginning did. Returns 0 when
/// `end <= begin`.
pub fn whole_months_between(begin: NaiveDateTime, end: NaiveDateTime) -> i64 {
    if end <= begin {
        return 0;
    }
    let mut months = (end.year() as i64 - begin.year() as i64) * 12 + end.month() as i64
        - begin.month() as i64;
    let end_pos = (end.day(), end.num_seconds_from_midnight());
    let begin_pos = (begin.day(), begin.num_seconds_from_midnight());
    if end_pos < begin_pos {
        months -= 1;
    }
    months.max(0)
}

/// Whole calendar years between two timestamps.
pub fn whole_years_between(begin: NaiveDateTime, end: NaiveDateTime) -> i64 {
    whole_months_between(begin, end) / 12
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn push_end(out: &mut Vec<NaiveDate>, end: NaiveDate) {
    if out.last() != Some(&end) {
        out.push(end);
    }
}

fn ensure_ordered(begin: NaiveDate, end: NaiveDate) -> Result<(), BurndownError> {
    if end <= begin {
        return Err(BurndownError::InvalidInterval {
            begin: begin.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
