//! Input/output helpers.
//!
//! - burndown JSON ingest + series selection (`ingest`)
//! - resampled series exports (JSON/CSV) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
