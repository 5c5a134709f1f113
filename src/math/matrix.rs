//! Dense matrix containers for survival histories.
//!
//! Both containers wrap `nalgebra::DMatrix<f64>`:
//!
//! - `SurvivalMatrix`: the coarse, cohort-major input (row = band, column = sample).
//!   Validated once on construction and never mutated afterwards.
//! - `DailyMatrix`: the dense per-day expansion written by the interpolator
//!   (row = cohort day, column = evaluation day).

use nalgebra::DMatrix;

use crate::error::BurndownError;

/// Coarse survival matrix, cohort-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalMatrix {
    inner: DMatrix<f64>,
}

impl SurvivalMatrix {
    /// Build from row-major nested rows.
    ///
    /// Rejects empty input, ragged rows, and negative or non-finite cells.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, BurndownError> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(BurndownError::EmptyMatrix);
        }

        for (row, values) in rows.iter().enumerate() {
            if values.len() != ncols {
                return Err(BurndownError::RaggedMatrix {
                    row,
                    expected: ncols,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(BurndownError::InvalidValue { row, col, value });
                }
            }
        }

        let inner = DMatrix::from_fn(nrows, ncols, |r, c| rows[r][c]);
        Ok(Self { inner })
    }

    /// Build from the wire orientation (one row per sample, one column per band).
    pub fn from_sample_rows(rows: &[Vec<f64>]) -> Result<Self, BurndownError> {
        Ok(Self::from_rows(rows)?.transposed())
    }

    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner[(row, col)]
    }

    pub fn transposed(&self) -> Self {
        Self {
            inner: self.inner.transpose(),
        }
    }
}

/// Dense per-day survival matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMatrix {
    inner: DMatrix<f64>,
}

impl DailyMatrix {
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            inner: DMatrix::zeros(nrows, ncols),
        }
    }

    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner[(row, col)] = value;
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.inner
    }
}

/// Convert a matrix into row-major nested vectors (the JSON wire shape).
pub fn to_rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}
