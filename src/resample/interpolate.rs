//! Growth/decay interpolation of a coarse survival matrix into daily resolution.
//!
//! Each coarse cell `(y, x)` covers the cohort band `[y·g, (y+1)·g)` (rows of the
//! daily matrix) evaluated over the sample window `[x·s, (x+1)·s)` (columns). The
//! relative position of band and window decides how the window is filled:
//!
//! - the band has not started yet: nothing to write;
//! - the band covers the rest of the window: lines are still being added, so the
//!   total ramps linearly towards the recorded value (**grow**);
//! - the band ends inside the window: ramp up to an estimated peak at the band end,
//!   then blend down towards the recorded value (**grow** + **decay**);
//! - the band ended before the window: only **decay**.
//!
//! A cell only ever writes rows of its own band and columns of its own window.

use tracing::debug;

use crate::error::BurndownError;
use crate::math::{DailyMatrix, SurvivalMatrix};

/// Position of a cohort band relative to a sample window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPhase {
    /// The cohort is created at or after the end of the window.
    Unborn,
    /// The band starts at or before the window start and covers the rest of it.
    Growing,
    /// The band starts inside the window and covers the rest of it.
    GrowingLate,
    /// The band ends inside the window: growth turns into decay at the band end.
    Peaking,
    /// The band ended before the window started.
    Decaying,
}

/// Classify the coarse cell `(y, x)`.
pub fn classify(y: usize, x: usize, granularity: usize, sampling: usize) -> CellPhase {
    let band_start = y * granularity;
    let band_end = (y + 1) * granularity;
    let window_start = x * sampling;
    let window_end = (x + 1) * sampling;

    if band_start >= window_end {
        CellPhase::Unborn
    } else if band_end >= window_end {
        if band_start <= window_start {
            CellPhase::Growing
        } else {
            CellPhase::GrowingLate
        }
    } else if band_end >= window_start {
        CellPhase::Peaking
    } else {
        CellPhase::Decaying
    }
}

/// Expand `matrix` (cohort-major) into a `(rows·granularity) × (cols·sampling)` daily matrix.
pub fn interpolate(
    matrix: &SurvivalMatrix,
    granularity: usize,
    sampling: usize,
) -> Result<DailyMatrix, BurndownError> {
    validate_resolution(granularity, sampling)?;

    let (rows, cols) = matrix.shape();
    debug!(rows, cols, granularity, sampling, "interpolating survival matrix");

    let mut daily = DailyMatrix::zeros(rows * granularity, cols * sampling);

    for y in 0..rows {
        for x in 0..cols {
            let cell = Cell {
                matrix,
                y,
                x,
                granularity,
                sampling,
            };
            match classify(y, x, granularity, sampling) {
                CellPhase::Unborn => {}
                CellPhase::Growing => {
                    grow(&mut daily, &cell, cell.window_end(), cell.value());
                }
                CellPhase::GrowingLate => {
                    grow(&mut daily, &cell, cell.window_end(), cell.value());
                    flatten_late_band(&mut daily, &cell);
                }
                CellPhase::Peaking => {
                    let peak = peak_value(&cell);
                    grow(&mut daily, &cell, cell.band_end(), peak);
                    decay(&mut daily, &cell, cell.band_end(), peak);
                }
                CellPhase::Decaying => {
                    decay(&mut daily, &cell, cell.window_start(), cell.previous());
                }
            }
        }
    }

    Ok(daily)
}

pub(crate) fn validate_resolution(granularity: usize, sampling: usize) -> Result<(), BurndownError> {
    if granularity == 0 {
        return Err(BurndownError::InvalidResolution {
            name: "granularity",
            value: granularity,
        });
    }
    if sampling == 0 {
        return Err(BurndownError::InvalidResolution {
            name: "sampling",
            value: sampling,
        });
    }
    Ok(())
}

/// Cursor over one coarse cell.
struct Cell<'a> {
    matrix: &'a SurvivalMatrix,
    y: usize,
    x: usize,
    granularity: usize,
    sampling: usize,
}

impl Cell<'_> {
    fn band_start(&self) -> usize {
        self.y * self.granularity
    }

    fn band_end(&self) -> usize {
        (self.y + 1) * self.granularity
    }

    fn window_start(&self) -> usize {
        self.x * self.sampling
    }

    fn window_end(&self) -> usize {
        (self.x + 1) * self.sampling
    }

    /// Recorded value of this cohort at sample `x`.
    fn at(&self, x: usize) -> f64 {
        self.matrix.get(self.y, x)
    }

    fn value(&self) -> f64 {
        self.at(self.x)
    }

    /// Recorded value at the previous sample (0 before the first sample).
    fn previous(&self) -> f64 {
        if self.x > 0 { self.at(self.x - 1) } else { 0.0 }
    }
}

/// Ramp the cohort total from the previous sample's value to `finish_val` over
/// `[max(window_start, band_start), finish)`.
///
/// Every open cohort day receives the same per-day increment; cohort days created
/// before the window keep carrying their previous value.
fn grow(daily: &mut DailyMatrix, cell: &Cell<'_>, finish: usize, finish_val: f64) {
    let initial = cell.previous();
    let start = cell.window_start().max(cell.band_start());
    if finish <= start {
        return;
    }

    let avg = (finish_val - initial) / (finish - start) as f64;
    for j in cell.window_start()..finish {
        for i in start..=j {
            daily.set(i, j, avg);
        }
    }

    for j in cell.window_start()..finish {
        for i in cell.band_start()..cell.window_start() {
            daily.set(i, j, daily.get(i, j - 1));
        }
    }
}

/// Blend every cohort day of the band from its value just before `start` towards
/// `value / start_val` of it at the window end.
fn decay(daily: &mut DailyMatrix, cell: &Cell<'_>, start: usize, start_val: f64) {
    if start_val == 0.0 {
        return;
    }
    let Some(before) = start.checked_sub(1) else {
        return;
    };

    let end = cell.window_end();
    let k = cell.value() / start_val;
    let scale = (end - start) as f64;

    for i in cell.band_start()..cell.band_end() {
        let initial = daily.get(i, before);
        for j in start..end {
            let val = initial * (1.0 + (k - 1.0) * (j - start + 1) as f64 / scale);
            daily.set(i, j, val);
        }
    }
}

/// Uniform-density overwrite of the part of the window after a late band start.
///
/// Kept for output compatibility with existing burndown charts; it only differs
/// from the preceding `grow` when the previous sample recorded lines for a cohort
/// that did not exist yet.
fn flatten_late_band(daily: &mut DailyMatrix, cell: &Cell<'_>) {
    let start = cell.band_start();
    let end = cell.window_end();
    let avg = cell.value() / (end - start) as f64;
    for j in start..end {
        for i in start..=j {
            daily.set(i, j, avg);
        }
    }
}

/// Estimated cohort total at the band end.
///
/// Extrapolates the slope of the last growth step; never lower than the value
/// recorded at the end of the window.
fn peak_value(cell: &Cell<'_>) -> f64 {
    let sampling = cell.sampling;
    let v1 = cell.previous();
    let v2 = cell.value();
    let delta = (cell.band_end() - cell.window_start()) as f64;

    // Negative when the band starts inside the window.
    let (previous, scale) = if cell.x > 0 && (cell.x - 1) * sampling >= cell.band_start() {
        let previous = if cell.x > 1 { cell.at(cell.x - 2) } else { 0.0 };
        (previous, sampling as f64)
    } else if cell.x == 0 {
        (0.0, sampling as f64)
    } else {
        (0.0, cell.window_start() as f64 - cell.band_start() as f64)
    };

    let slope = if scale == 0.0 {
        0.0
    } else {
        (v1 - previous) / scale
    };
    let mut peak = v1 + slope * delta;

    if v2 > peak {
        peak = if cell.x + 1 < cell.matrix.ncols() {
            let k = (v2 - cell.at(cell.x + 1)) / sampling as f64;
            v2 + k * (cell.window_end() - cell.band_end()) as f64
        } else {
            v2
        };
    }

    peak.max(v2)
}
