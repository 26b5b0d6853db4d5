//! Chart artifacts for the analysis pipeline, rendered with `plotlars`.
//! Filenames are fixed so a run always produces the same set of files.

use crate::analysis::error::AnalysisError;
use crate::analysis::summary::{group_mean_frame, COL_MEAN_SNOWFALL};
use crate::types::cleaned_table::{COL_AVG_SNOWFALL_IN, COL_PEAK_ELEVATION_FT, COL_RESORT, COL_STATE};
use crate::types::region::COL_REGION;
use log::info;
use plotlars::{BarPlot, BoxPlot, Histogram, Plot, ScatterPlot};
use polars::prelude::*;
use std::path::{Path, PathBuf};

const CHART_SNOWFALL_DISTRIBUTION: &str = "snowfall_distribution.html";
const CHART_SNOWFALL_BY_REGION: &str = "snowfall_by_region.html";
const CHART_TOP_RESORTS: &str = "top_resorts.html";
const CHART_STATE_SNOWFALL: &str = "state_snowfall.html";
const CHART_SNOWFALL_VS_ELEVATION: &str = "snowfall_vs_elevation.html";

const TOP_RESORT_CHART_ROWS: usize = 10;

/// Writes every exploratory chart into `plot_dir` and returns the paths,
/// in a fixed order.
pub(crate) fn render(frame: &DataFrame, plot_dir: &Path) -> Result<Vec<PathBuf>, AnalysisError> {
    std::fs::create_dir_all(plot_dir)
        .map_err(|e| AnalysisError::PlotDirCreation(plot_dir.to_path_buf(), e))?;

    let charts = vec![
        snowfall_distribution(frame, plot_dir)?,
        snowfall_by_region(frame, plot_dir)?,
        top_resorts(frame, plot_dir)?,
        state_snowfall(frame, plot_dir)?,
        snowfall_vs_elevation(frame, plot_dir)?,
    ];

    info!("Wrote {} charts to {}", charts.len(), plot_dir.display());
    Ok(charts)
}

fn snowfall_distribution(frame: &DataFrame, plot_dir: &Path) -> Result<PathBuf, AnalysisError> {
    let path = plot_dir.join(CHART_SNOWFALL_DISTRIBUTION);
    Histogram::builder()
        .data(frame)
        .x(COL_AVG_SNOWFALL_IN)
        .plot_title("Distribution of Average Annual Snowfall")
        .x_title("Average annual snowfall (in)")
        .y_title("Resorts")
        .build()
        .write_html(path.display().to_string());
    Ok(path)
}

fn snowfall_by_region(frame: &DataFrame, plot_dir: &Path) -> Result<PathBuf, AnalysisError> {
    // Rows from states without a region mapping would show up as a null
    // box, drop them.
    let with_region = frame
        .clone()
        .lazy()
        .filter(col(COL_REGION).is_not_null())
        .collect()?;

    let path = plot_dir.join(CHART_SNOWFALL_BY_REGION);
    BoxPlot::builder()
        .data(&with_region)
        .labels(COL_REGION)
        .values(COL_AVG_SNOWFALL_IN)
        .plot_title("Average Annual Snowfall by Region")
        .x_title("Region")
        .y_title("Average annual snowfall (in)")
        .build()
        .write_html(path.display().to_string());
    Ok(path)
}

fn top_resorts(frame: &DataFrame, plot_dir: &Path) -> Result<PathBuf, AnalysisError> {
    let top = frame
        .sort(
            [COL_AVG_SNOWFALL_IN],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )?
        .head(Some(TOP_RESORT_CHART_ROWS));

    let path = plot_dir.join(CHART_TOP_RESORTS);
    BarPlot::builder()
        .data(&top)
        .labels(COL_RESORT)
        .values(COL_AVG_SNOWFALL_IN)
        .plot_title("Top 10 Resorts by Average Annual Snowfall")
        .x_title("Resort")
        .y_title("Average annual snowfall (in)")
        .build()
        .write_html(path.display().to_string());
    Ok(path)
}

fn state_snowfall(frame: &DataFrame, plot_dir: &Path) -> Result<PathBuf, AnalysisError> {
    let means = group_mean_frame(frame, COL_STATE)?;

    let path = plot_dir.join(CHART_STATE_SNOWFALL);
    BarPlot::builder()
        .data(&means)
        .labels(COL_STATE)
        .values(COL_MEAN_SNOWFALL)
        .plot_title("Average Annual Snowfall per State/Province")
        .x_title("State/Province")
        .y_title("Average annual snowfall (in)")
        .build()
        .write_html(path.display().to_string());
    Ok(path)
}

fn snowfall_vs_elevation(frame: &DataFrame, plot_dir: &Path) -> Result<PathBuf, AnalysisError> {
    let with_elevation = frame
        .clone()
        .lazy()
        .filter(
            col(COL_PEAK_ELEVATION_FT)
                .is_not_null()
                .and(col(COL_STATE).is_not_null()),
        )
        .collect()?;

    let path = plot_dir.join(CHART_SNOWFALL_VS_ELEVATION);
    ScatterPlot::builder()
        .data(&with_elevation)
        .x(COL_PEAK_ELEVATION_FT)
        .y(COL_AVG_SNOWFALL_IN)
        .group(COL_STATE)
        .plot_title("Average Snowfall vs Peak Elevation")
        .x_title("Peak elevation (ft)")
        .y_title("Average annual snowfall (in)")
        .build()
        .write_html(path.display().to_string());
    Ok(path)
}
