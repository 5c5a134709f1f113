//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the resample pipeline
//! - prints summaries/tables/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, InputArgs, ResampleArgs};
use crate::domain::ResampleConfig;
use crate::error::AppError;
use crate::io::ingest::{list_series, load_history, select_series};
use crate::math::{datetime_from_epoch, whole_months_between, whole_years_between};
use crate::resample::choose_default_resampling;

pub mod pipeline;

/// Entry point for the `burndown` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; flags and the real environment still apply.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Resample(args) => handle_resample(args),
        Command::Suggest(args) => handle_suggest(args),
        Command::List(args) => handle_list(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Diagnostics go to stderr so stdout stays pipeable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_resample(args: ResampleArgs) -> Result<(), AppError> {
    let mut config = resample_config_from_args(&args);
    let history = load_history(&config.input)?;
    if args.all_people {
        config.series = pipeline::with_all_people(config.series, &history);
    }

    let runs = pipeline::run_resample_with_history(&config, &history)?;
    let multiple = runs.len() > 1;

    for run in &runs {
        println!(
            "{}",
            crate::report::format_run_summary(
                &run.selector,
                &run.input,
                run.resampling,
                &run.series,
                &run.row_dates,
                &config,
            )
        );

        let table = crate::report::format_table(&run.series, &run.row_dates, config.table_rows);
        if !table.is_empty() {
            println!("{table}");
        }

        if config.plot {
            let plot = crate::plot::render_stacked_plot(&run.series, config.plot_width, config.plot_height);
            println!("{plot}");
        }

        // Optional exports.
        if let Some(path) = &config.export_json {
            let path = crate::io::export::path_for_series(path, &run.selector, multiple);
            crate::io::export::write_series_json(&path, &run.series)?;
        }
        if let Some(path) = &config.export_csv {
            let path = crate::io::export::path_for_series(path, &run.selector, multiple);
            crate::io::export::write_series_csv(&path, &run.series, &run.row_dates)?;
        }
    }

    Ok(())
}

fn handle_suggest(args: InputArgs) -> Result<(), AppError> {
    let history = load_history(&args.input)?;
    let resampling = choose_default_resampling(history.begin, history.end);

    match (datetime_from_epoch(history.begin), datetime_from_epoch(history.end)) {
        (Some(begin), Some(end)) => println!(
            "{} ({} .. {}: {} whole years, {} whole months)",
            resampling.display_name(),
            begin.date(),
            end.date(),
            whole_years_between(begin, end),
            whole_months_between(begin, end),
        ),
        _ => println!("{}", resampling.display_name()),
    }
    Ok(())
}

fn handle_list(args: InputArgs) -> Result<(), AppError> {
    let history = load_history(&args.input)?;

    for selector in list_series(&history) {
        let input = select_series(&history, &selector)?;
        println!(
            "{selector}\t{} samples x {} bands",
            input.data.len(),
            input.data.first().map(Vec::len).unwrap_or(0)
        );
    }
    Ok(())
}

pub fn resample_config_from_args(args: &ResampleArgs) -> ResampleConfig {
    ResampleConfig {
        input: args.input.clone(),
        mode: args.mode,
        granularity: args.granularity,
        sampling: args.sampling,
        series: args.series.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        table_rows: args.rows,
        export_json: args.export.clone(),
        export_csv: args.export_csv.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResampleMode, SeriesSelector};

    #[test]
    fn config_folds_plot_flags() {
        let cli = crate::cli::Cli::try_parse_from([
            "burndown",
            "resample",
            "in.json",
            "-g",
            "30",
            "-s",
            "30",
            "--no-plot",
            "--rows",
            "3",
            "--export-csv",
            "out.csv",
        ])
        .unwrap();
        let Command::Resample(args) = cli.command else {
            panic!("expected resample");
        };

        let config = resample_config_from_args(&args);
        assert!(!config.plot);
        assert_eq!(config.mode, ResampleMode::Auto);
        assert_eq!(config.series, vec![SeriesSelector::Project]);
        assert_eq!(config.table_rows, 3);
        assert_eq!(config.export_csv.as_deref(), Some(std::path::Path::new("out.csv")));
        assert!(config.export_json.is_none());
    }
}
