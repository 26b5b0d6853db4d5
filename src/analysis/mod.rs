//! The analysis pipeline: validate the cleaned table, compute descriptive
//! statistics and write exploratory charts. No network access, only
//! in-memory compute plus file-system writes for the chart artifacts.

pub(crate) mod charts;
pub(crate) mod error;
pub(crate) mod summary;

use crate::analysis::error::AnalysisError;
use crate::analysis::summary::SummaryResult;
use crate::error::SnowlineError;
use crate::snowline::Snowline;
use crate::types::cleaned_table::{CleanedTable, EXPECTED_COLUMNS};
use crate::types::region::assign_regions;
use log::info;
use std::path::Path;

/// Runs the analysis pipeline with default settings, writing charts into
/// the default `plots/` directory. Equivalent to building a default
/// [`Snowline`] client and calling [`Snowline::run_analysis_pipeline`].
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyTable`] or [`AnalysisError::MissingColumn`]
/// (wrapped in [`SnowlineError`]) when the table fails the minimum-shape
/// checks, and other [`AnalysisError`] variants when aggregation or chart
/// writing fails.
pub fn run_analysis_pipeline(table: &CleanedTable) -> Result<SummaryResult, SnowlineError> {
    let client = Snowline::builder().build()?;
    client.run_analysis_pipeline(table)
}

pub(crate) fn run(table: &CleanedTable, plot_dir: &Path) -> Result<SummaryResult, AnalysisError> {
    info!("Running analysis pipeline over {} rows", table.height());
    validate(table)?;

    let frame = assign_regions(&table.frame)?;
    let mut summary = summary::summarize(&frame)?;
    summary.charts = charts::render(&frame, plot_dir)?;

    info!(
        "Analysis complete: {} resorts, mean snowfall {:.1} in",
        summary.resort_count, summary.mean_snowfall
    );
    Ok(summary)
}

fn validate(table: &CleanedTable) -> Result<(), AnalysisError> {
    for column in EXPECTED_COLUMNS {
        if table.frame.column(column).is_err() {
            return Err(AnalysisError::MissingColumn(column.to_string()));
        }
    }
    if table.is_empty() {
        return Err(AnalysisError::EmptyTable);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::tests::frame_from_rows;
    use polars::prelude::*;

    fn sample_table() -> CleanedTable {
        CleanedTable::new(frame_from_rows(&[
            ("ResortA", "Colorado", 120.0, 13000.0),
            ("ResortA", "Colorado", 80.0, 13000.0),
            ("ResortB", "Utah", 500.0, 11000.0),
            ("ResortC", "Vermont", 250.0, 4000.0),
        ]))
    }

    #[test]
    fn empty_table_fails_validation() {
        let table = CleanedTable::new(frame_from_rows(&[]));
        let dir = tempfile::tempdir().unwrap();
        let err = run(&table, dir.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyTable));
    }

    #[test]
    fn missing_column_fails_validation() {
        let frame = df!("resort" => vec!["ResortA".to_string()]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = run(&CleanedTable::new(frame), dir.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(_)));
    }

    #[test]
    fn writes_all_chart_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(&sample_table(), dir.path()).unwrap();

        assert_eq!(summary.charts.len(), 5);
        for chart in &summary.charts {
            assert!(chart.exists(), "missing chart artifact {chart:?}");
        }
    }

    #[test]
    fn analysis_is_deterministic() {
        let table = sample_table();
        let dir = tempfile::tempdir().unwrap();

        let first = run(&table, dir.path()).unwrap();
        let second = run(&table, dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn summarizes_resort_totals() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(&sample_table(), dir.path()).unwrap();

        let resort_a = summary
            .resort_totals
            .iter()
            .find(|r| r.resort == "ResortA")
            .unwrap();
        assert_eq!(resort_a.total_snowfall, 200.0);
        assert_eq!(summary.row_count, 4);
        assert_eq!(summary.resort_count, 3);
        assert_eq!(summary.max_snowfall, 500.0);
    }
}
