//! Shared "resample pipeline" logic.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load report -> resolve selectors -> pick resampling -> resample each series -> row dates
//!
//! The front-end can then focus on presentation (printing, plotting, exports).

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::{BurndownInput, BurndownSeries, HistoryData, ResampleConfig, Resampling, SeriesSelector};
use crate::error::AppError;
use crate::io::ingest::{load_history, select_series};
use crate::resample::{choose_default_resampling, resample, row_dates};

/// All computed outputs for one selected series.
#[derive(Debug, Clone)]
pub struct SeriesRun {
    pub selector: SeriesSelector,
    pub input: BurndownInput,
    pub resampling: Resampling,
    pub series: BurndownSeries,
    /// Calendar date of each output row.
    pub row_dates: Vec<NaiveDate>,
}

/// Load the report named by `config` and resample every selected series.
pub fn run_resample(config: &ResampleConfig) -> Result<Vec<SeriesRun>, AppError> {
    let history = load_history(&config.input)?;
    run_resample_with_history(config, &history)
}

/// Resample the selected series of an already-loaded report.
///
/// Series are independent, so they are resampled in parallel; results keep the
/// order of `config.series`.
pub fn run_resample_with_history(
    config: &ResampleConfig,
    history: &HistoryData,
) -> Result<Vec<SeriesRun>, AppError> {
    if config.series.is_empty() {
        return Err(AppError::new(2, "No series selected."));
    }

    let resampling = resolve_resampling(config, history);
    info!(
        resampling = resampling.display_name(),
        series = config.series.len(),
        "resampling report"
    );

    let runs = config
        .series
        .par_iter()
        .map(|selector| resample_one(config, history, selector, resampling))
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(runs)
}

/// Resampling actually used for a run (explicit mode, or picked from the span).
pub fn resolve_resampling(config: &ResampleConfig, history: &HistoryData) -> Resampling {
    config
        .mode
        .to_resampling()
        .unwrap_or_else(|| choose_default_resampling(history.begin, history.end))
}

/// Append every developer with a non-empty history to `selectors`.
///
/// Empty developers are skipped with a warning; selectors already present are kept once.
pub fn with_all_people(mut selectors: Vec<SeriesSelector>, history: &HistoryData) -> Vec<SeriesSelector> {
    for (idx, name) in history.people_list.iter().enumerate() {
        let selector = SeriesSelector::Person(name.clone());
        if selectors.contains(&selector) {
            continue;
        }
        if history.people_data.get(idx).is_none_or(|d| d.is_empty()) {
            warn!(person = %name, "skipping developer without burndown history");
            continue;
        }
        selectors.push(selector);
    }
    selectors
}

fn resample_one(
    config: &ResampleConfig,
    history: &HistoryData,
    selector: &SeriesSelector,
    resampling: Resampling,
) -> Result<SeriesRun, AppError> {
    let input = select_series(history, selector)?;
    let series = resample(&input, resampling, config.granularity, config.sampling)
        .map_err(|e| AppError::from(e).context(selector))?;
    let row_dates = row_dates(input.begin, resampling, series.data.len(), config.sampling)?;

    info!(
        series = %selector,
        rows = series.data.len(),
        buckets = series.keys.len(),
        "resampled series"
    );

    Ok(SeriesRun {
        selector: selector.clone(),
        input,
        resampling,
        series,
        row_dates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BucketKey, ResampleMode};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    // 2017-04-01T00:00:00Z .. 2017-05-31T00:00:00Z
    const BEGIN: i64 = 1_491_004_800;
    const END: i64 = 1_496_188_800;

    fn history() -> HistoryData {
        HistoryData {
            begin: BEGIN,
            end: END,
            project: vec![vec![100.0, 0.0], vec![80.0, 50.0]],
            files_data: BTreeMap::from([("main.go".to_string(), vec![vec![10.0, 0.0], vec![8.0, 5.0]])]),
            people_data: vec![vec![vec![60.0, 0.0], vec![50.0, 20.0]], vec![]],
            people_list: vec!["alice".to_string(), "bob".to_string()],
        }
    }

    fn config(mode: ResampleMode, series: Vec<SeriesSelector>) -> ResampleConfig {
        ResampleConfig {
            input: PathBuf::from("unused.json"),
            mode,
            granularity: 30,
            sampling: 30,
            series,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            table_rows: 5,
            export_json: None,
            export_csv: None,
        }
    }

    #[test]
    fn resamples_selected_series_in_order() {
        let cfg = config(
            ResampleMode::Month,
            vec![SeriesSelector::File("main.go".into()), SeriesSelector::Project],
        );
        let runs = run_resample_with_history(&cfg, &history()).unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].selector, SeriesSelector::File("main.go".into()));
        assert_eq!(runs[1].selector, SeriesSelector::Project);
        for run in &runs {
            assert_eq!(run.resampling, Resampling::Month);
            assert_eq!(run.series.data.len(), 60);
            assert_eq!(
                run.series.keys,
                vec![BucketKey::Label("Apr 2017".into()), BucketKey::Label("May 2017".into())]
            );
            assert_eq!(run.row_dates.len(), 60);
            assert_eq!(run.row_dates[0], NaiveDate::from_ymd_opt(2017, 4, 1).unwrap());
        }
    }

    #[test]
    fn auto_mode_uses_span() {
        // Two months apart: too short for month buckets.
        let cfg = config(ResampleMode::Auto, vec![SeriesSelector::Project]);
        assert_eq!(resolve_resampling(&cfg, &history()), Resampling::Raw);

        let runs = run_resample_with_history(&cfg, &history()).unwrap();
        assert_eq!(runs[0].series.data, history().project);
        assert_eq!(runs[0].row_dates[1], NaiveDate::from_ymd_opt(2017, 5, 1).unwrap());
    }

    #[test]
    fn unknown_series_fails_whole_run() {
        let cfg = config(
            ResampleMode::Month,
            vec![SeriesSelector::Project, SeriesSelector::Person("carol".into())],
        );
        let err = run_resample_with_history(&cfg, &history()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn all_people_skips_empty_histories() {
        let selectors = with_all_people(vec![SeriesSelector::Project], &history());
        assert_eq!(
            selectors,
            vec![SeriesSelector::Project, SeriesSelector::Person("alice".into())]
        );

        let again = with_all_people(selectors.clone(), &history());
        assert_eq!(again, selectors);
    }
}
