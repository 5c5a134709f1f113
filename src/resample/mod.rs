//! Survival-history resampling engine.
//!
//! Responsibilities:
//!
//! - expand coarse (band × sample) survival matrices to daily resolution
//! - sum daily cohorts into calendar buckets
//! - expose chart-ready facades (`to_months`, `to_years`, `to_raw`)

pub mod aggregate;
pub mod facade;
pub mod interpolate;

pub use aggregate::*;
pub use facade::*;
pub use interpolate::*;
