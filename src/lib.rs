//! `burndown-curves` library crate.
//!
//! The binary (`burndown`) is a thin wrapper around this library so that:
//!
//! - the resampling engine is testable without spawning processes
//! - the engine is reusable by other front-ends (chart servers, notebooks, etc.)
//! - code stays easy to navigate as the project grows
//!
//! The engine lives in `math` (calendar boundaries, matrices) and `resample`
//! (daily interpolation, bucket aggregation, `to_months` / `to_years`).

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod resample;
