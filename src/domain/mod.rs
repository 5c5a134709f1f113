//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - engine input/output (`BurndownInput`, `BurndownSeries`, `BucketKey`)
//! - resampling choices (`ResampleMode`, `Resampling`)
//! - server report shapes and series selection (`HistoryReport`, `SeriesSelector`)
//! - run configuration (`ResampleConfig`)

pub mod types;

pub use types::*;
