//! Command-line parsing for the burndown resampler.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the resampling engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_GRANULARITY, DEFAULT_SAMPLING, ResampleMode, SeriesSelector};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "burndown", version, about = "Line-survival burndown resampler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resample one or more histories of a report, print a summary/table/plot and
    /// optionally export.
    Resample(ResampleArgs),
    /// Print the resampling `auto` would pick for a report's span.
    Suggest(InputArgs),
    /// List the series (project, people, files) available in a report.
    List(InputArgs),
}

/// Options shared by commands that only need the report.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Burndown JSON (bare `{begin,end,data}` or the server's `{data,error}` envelope).
    #[arg(value_name = "JSON")]
    pub input: PathBuf,
}

/// Options for resampling.
#[derive(Debug, Args, Clone)]
pub struct ResampleArgs {
    /// Burndown JSON (bare `{begin,end,data}` or the server's `{data,error}` envelope).
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Bucket size (auto picks from the report span).
    #[arg(short = 'm', long, value_enum, default_value_t = ResampleMode::Auto)]
    pub mode: ResampleMode,

    /// Days per cohort band.
    #[arg(short = 'g', long, env = "BURNDOWN_GRANULARITY", default_value_t = DEFAULT_GRANULARITY)]
    pub granularity: usize,

    /// Days per sample.
    #[arg(short = 's', long, env = "BURNDOWN_SAMPLING", default_value_t = DEFAULT_SAMPLING)]
    pub sampling: usize,

    /// Series to resample: `project`, `person:<name>` or `file:<path>` (repeatable).
    #[arg(long = "series", value_name = "SEL", default_value = "project")]
    pub series: Vec<SeriesSelector>,

    /// Also resample every developer with a non-empty history.
    #[arg(long)]
    pub all_people: bool,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Number of trailing rows listed in the table (0 disables the table).
    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    /// Export the resampled series to JSON (`{data, keys}`).
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export the resampled series to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}
