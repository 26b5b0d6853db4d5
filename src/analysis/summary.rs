//! Descriptive statistics over the cleaned table. Everything here is a
//! pure function of the input frame; the same table always produces the
//! same `SummaryResult`.

use crate::analysis::error::AnalysisError;
use crate::types::cleaned_table::{
    COL_AVG_SNOWFALL_IN, COL_PEAK_ELEVATION_FT, COL_RESORT, COL_STATE, COL_TOTAL_LIFTS,
    COL_TOTAL_TRAILS,
};
use crate::types::region::COL_REGION;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const COL_TOTAL_SNOWFALL: &str = "total_snowfall";
pub(crate) const COL_MEAN_SNOWFALL: &str = "mean_snowfall";

/// Snowfall aggregates for one resort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortSnowfall {
    pub resort: String,
    pub state: Option<String>,
    /// Sum of every snowfall value listed for this resort.
    pub total_snowfall: f64,
    pub mean_snowfall: f64,
}

/// Mean snowfall for one group (a state/province or a region).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub name: String,
    pub mean_snowfall: f64,
}

/// Aggregate statistics derived from a cleaned table.
///
/// Recomputed on every analysis run; never persisted as authoritative
/// state. The chart paths list whatever artifacts the run wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub row_count: usize,
    pub resort_count: usize,
    pub mean_snowfall: f64,
    pub max_snowfall: f64,
    /// Per-resort totals, largest total first.
    pub resort_totals: Vec<ResortSnowfall>,
    /// The ten snowiest resorts, by total snowfall.
    pub top_resorts: Vec<ResortSnowfall>,
    /// Mean snowfall per state/province, snowiest first.
    pub state_means: Vec<GroupMean>,
    /// Mean snowfall per region, snowiest first.
    pub region_means: Vec<GroupMean>,
    /// Pearson correlation between average snowfall and peak elevation.
    pub snowfall_elevation_corr: Option<f64>,
    /// Pearson correlation between trail count and lift count.
    pub trails_lifts_corr: Option<f64>,
    pub charts: Vec<PathBuf>,
}

impl SummaryResult {
    pub fn to_json(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

const TOP_RESORT_COUNT: usize = 10;

/// Computes every aggregate of the summary from a frame that already
/// carries the `region` column. Chart paths are filled in by the caller.
pub(crate) fn summarize(frame: &DataFrame) -> Result<SummaryResult, AnalysisError> {
    let snowfall = frame.column(COL_AVG_SNOWFALL_IN)?.f64()?;
    let mean_snowfall = snowfall.mean().ok_or(AnalysisError::EmptyTable)?;
    let max_snowfall = snowfall.max().ok_or(AnalysisError::EmptyTable)?;

    let totals_frame = resort_totals_frame(frame)?;
    let resort_totals = collect_resort_totals(&totals_frame)?;
    let top_resorts = resort_totals
        .iter()
        .take(TOP_RESORT_COUNT)
        .cloned()
        .collect();

    Ok(SummaryResult {
        row_count: frame.height(),
        resort_count: resort_totals.len(),
        mean_snowfall,
        max_snowfall,
        top_resorts,
        resort_totals,
        state_means: collect_group_means(&group_mean_frame(frame, COL_STATE)?, COL_STATE)?,
        region_means: collect_group_means(&group_mean_frame(frame, COL_REGION)?, COL_REGION)?,
        snowfall_elevation_corr: column_correlation(
            frame,
            COL_AVG_SNOWFALL_IN,
            COL_PEAK_ELEVATION_FT,
        )?,
        trails_lifts_corr: column_correlation(frame, COL_TOTAL_TRAILS, COL_TOTAL_LIFTS)?,
        charts: Vec::new(),
    })
}

/// Per-resort snowfall totals and means, sorted by total descending with
/// the resort name as a stable tie-breaker.
pub(crate) fn resort_totals_frame(frame: &DataFrame) -> Result<DataFrame, PolarsError> {
    frame
        .clone()
        .lazy()
        .group_by([col(COL_RESORT), col(COL_STATE)])
        .agg([
            col(COL_AVG_SNOWFALL_IN).sum().alias(COL_TOTAL_SNOWFALL),
            col(COL_AVG_SNOWFALL_IN).mean().alias(COL_MEAN_SNOWFALL),
        ])
        .sort(
            [COL_TOTAL_SNOWFALL, COL_RESORT],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_maintain_order(true),
        )
        .collect()
}

/// Mean snowfall per value of `group_col`, snowiest first. Null group
/// values (e.g. states without a region mapping) are left out.
pub(crate) fn group_mean_frame(
    frame: &DataFrame,
    group_col: &str,
) -> Result<DataFrame, PolarsError> {
    frame
        .clone()
        .lazy()
        .filter(col(group_col).is_not_null())
        .group_by([col(group_col)])
        .agg([col(COL_AVG_SNOWFALL_IN).mean().alias(COL_MEAN_SNOWFALL)])
        .sort(
            [COL_MEAN_SNOWFALL, group_col],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_maintain_order(true),
        )
        .collect()
}

fn collect_resort_totals(frame: &DataFrame) -> Result<Vec<ResortSnowfall>, AnalysisError> {
    let resorts = frame.column(COL_RESORT)?.str()?;
    let states = frame.column(COL_STATE)?.str()?;
    let totals = frame.column(COL_TOTAL_SNOWFALL)?.f64()?;
    let means = frame.column(COL_MEAN_SNOWFALL)?.f64()?;

    let mut out = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let (Some(resort), Some(total), Some(mean)) =
            (resorts.get(idx), totals.get(idx), means.get(idx))
        else {
            continue;
        };
        out.push(ResortSnowfall {
            resort: resort.to_string(),
            state: states.get(idx).map(str::to_string),
            total_snowfall: total,
            mean_snowfall: mean,
        });
    }
    Ok(out)
}

fn collect_group_means(
    frame: &DataFrame,
    group_col: &str,
) -> Result<Vec<GroupMean>, AnalysisError> {
    let names = frame.column(group_col)?.str()?;
    let means = frame.column(COL_MEAN_SNOWFALL)?.f64()?;

    let mut out = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let (Some(name), Some(mean)) = (names.get(idx), means.get(idx)) else {
            continue;
        };
        out.push(GroupMean {
            name: name.to_string(),
            mean_snowfall: mean,
        });
    }
    Ok(out)
}

/// Pearson correlation between two numeric columns over the rows where
/// both are present. `None` with fewer than two complete pairs or zero
/// variance.
pub(crate) fn column_correlation(
    frame: &DataFrame,
    a: &str,
    b: &str,
) -> Result<Option<f64>, AnalysisError> {
    let ca_a = frame.column(a)?.f64()?;
    let ca_b = frame.column(b)?.f64()?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (x, y) in ca_a.into_iter().zip(ca_b) {
        if let (Some(x), Some(y)) = (x, y) {
            xs.push(x);
            ys.push(y);
        }
    }
    Ok(pearson(&xs, &ys))
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
