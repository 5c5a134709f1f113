//! Error types.
//!
//! - `BurndownError`: failures of the resampling engine (malformed input,
//!   degenerate aggregation buckets).
//! - `AppError`: what the `burndown` binary reports, carrying a process exit code.
//!
//! Exit codes: `2` for bad input/files, `4` for computation failures.

use thiserror::Error;

/// Engine error taxonomy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BurndownError {
    #[error("survival matrix is empty")]
    EmptyMatrix,

    #[error("survival matrix row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("survival matrix cell ({row}, {col}) holds invalid value {value} (must be finite and >= 0)")]
    InvalidValue { row: usize, col: usize, value: f64 },

    #[error("{name} must be >= 1, got {value}")]
    InvalidResolution { name: &'static str, value: usize },

    #[error("invalid time interval: begin={begin}, end={end} (end must fall on a later calendar day)")]
    InvalidInterval { begin: String, end: String },

    #[error("at least two boundaries are required to form a bucket, got {0}")]
    TooFewBoundaries(usize),

    #[error("bucket {index} is empty or reversed (days {start}..{finish})")]
    EmptyBucket {
        index: usize,
        start: i64,
        finish: i64,
    },

    #[error("bucket {index} ends at day {finish} but only {rows} cohort days were interpolated")]
    BucketOutOfRange {
        index: usize,
        finish: usize,
        rows: usize,
    },
}

impl BurndownError {
    /// Whether the error describes bad caller input (as opposed to an engine defect).
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            BurndownError::TooFewBoundaries(_)
                | BurndownError::EmptyBucket { .. }
                | BurndownError::BucketOutOfRange { .. }
        )
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// Prefix the message with what was being processed, keeping the exit code.
    pub fn context(self, what: impl std::fmt::Display) -> Self {
        Self {
            exit_code: self.exit_code,
            message: format!("{what}: {}", self.message),
        }
    }
}

impl From<BurndownError> for AppError {
    fn from(err: BurndownError) -> Self {
        let code = if err.is_input_error() { 2 } else { 4 };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
