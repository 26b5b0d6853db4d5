//! Typed row extraction from the cleaned frame, in the style of collecting
//! a frame into plain structs for callers that do not want to touch Polars.

use crate::types::cleaned_table::{
    COL_AVG_SNOWFALL_IN, COL_BASE_ELEVATION_FT, COL_NEAREST_CITY, COL_PEAK_ELEVATION_FT,
    COL_RESORT, COL_SKIABLE_ACRES, COL_STATE, COL_TOTAL_LIFTS, COL_TOTAL_TRAILS,
    COL_VERTICAL_DROP_FT,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One cleaned resort row.
///
/// `resort` and `avg_snowfall_in` are always present per the cleaned-table
/// invariant; every other field is whatever the source listed, or `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortRecord {
    pub resort: String,
    pub nearest_city: Option<String>,
    pub state: Option<String>,
    pub peak_elevation_ft: Option<f64>,
    pub base_elevation_ft: Option<f64>,
    pub vertical_drop_ft: Option<f64>,
    pub skiable_acres: Option<f64>,
    pub total_trails: Option<f64>,
    pub total_lifts: Option<f64>,
    pub avg_snowfall_in: f64,
}

fn opt_float(column: &Column, idx: usize) -> Option<f64> {
    column.f64().ok().and_then(|ca| ca.get(idx))
}

fn opt_str(column: &Column, idx: usize) -> Option<String> {
    column
        .str()
        .ok()
        .and_then(|ca| ca.get(idx))
        .map(str::to_string)
}

impl ResortRecord {
    /// Collects the frame into records. Fails if a row breaks the
    /// cleaned-table invariant (no resort name, or no snowfall value)
    /// rather than inventing a placeholder.
    pub(crate) fn from_frame(frame: &DataFrame) -> Result<Vec<ResortRecord>, PolarsError> {
        let resort = frame.column(COL_RESORT)?;
        let nearest_city = frame.column(COL_NEAREST_CITY)?;
        let state = frame.column(COL_STATE)?;
        let peak = frame.column(COL_PEAK_ELEVATION_FT)?;
        let base = frame.column(COL_BASE_ELEVATION_FT)?;
        let drop = frame.column(COL_VERTICAL_DROP_FT)?;
        let acres = frame.column(COL_SKIABLE_ACRES)?;
        let trails = frame.column(COL_TOTAL_TRAILS)?;
        let lifts = frame.column(COL_TOTAL_LIFTS)?;
        let snowfall = frame.column(COL_AVG_SNOWFALL_IN)?;

        let mut records = Vec::with_capacity(frame.height());
        for idx in 0..frame.height() {
            let name = opt_str(resort, idx).filter(|name| !name.is_empty());
            let Some(name) = name else {
                return Err(PolarsError::ComputeError(
                    format!("row {idx} has no resort name").into(),
                ));
            };
            let Some(snowfall) = opt_float(snowfall, idx) else {
                return Err(PolarsError::ComputeError(
                    format!("row {idx} ({name}) has no snowfall value").into(),
                ));
            };
            records.push(ResortRecord {
                resort: name,
                nearest_city: opt_str(nearest_city, idx),
                state: opt_str(state, idx),
                peak_elevation_ft: opt_float(peak, idx),
                base_elevation_ft: opt_float(base, idx),
                vertical_drop_ft: opt_float(drop, idx),
                skiable_acres: opt_float(acres, idx),
                total_trails: opt_float(trails, idx),
                total_lifts: opt_float(lifts, idx),
                avg_snowfall_in: snowfall,
            });
        }
        Ok(records)
    }
}
