//! Geographic regions derived from the state/province column, used for the
//! per-region snowfall aggregates and the box plot.

use crate::types::cleaned_table::COL_STATE;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const COL_REGION: &str = "region";

/// Coarse geographic region of a resort, mapped from its state/province.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    WesternUs,
    NortheastUs,
    MidwestUs,
    SoutheastUs,
    WesternCanada,
    EasternCanada,
}

impl Region {
    /// Maps a state or province name to its region. Unknown names yield
    /// `None` and the row simply carries a null region.
    pub fn from_state(state: &str) -> Option<Region> {
        use Region::*;
        let region = match state {
            "Alaska" | "Arizona" | "California" | "Colorado" | "Idaho" | "Montana" | "Nevada"
            | "New Mexico" | "Oregon" | "Utah" | "Washington" | "Wyoming" => WesternUs,
            "Connecticut" | "Maine" | "Massachusetts" | "New Hampshire" | "New Jersey"
            | "New York" | "Pennsylvania" | "Rhode Island" | "Vermont" => NortheastUs,
            "Illinois" | "Indiana" | "Iowa" | "Michigan" | "Minnesota" | "Missouri"
            | "North Dakota" | "Ohio" | "South Dakota" | "Wisconsin" => MidwestUs,
            "Alabama" | "Maryland" | "North Carolina" | "Tennessee" | "Virginia"
            | "West Virginia" => SoutheastUs,
            "Alberta" | "British Columbia" => WesternCanada,
            "Newfoundland and Labrador" | "Nova Scotia" | "Ontario" | "Quebec" => EasternCanada,
            _ => return None,
        };
        Some(region)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::WesternUs => "Western US",
            Region::NortheastUs => "Northeast US",
            Region::MidwestUs => "Midwest US",
            Region::SoutheastUs => "Southeast US",
            Region::WesternCanada => "Western Canada",
            Region::EasternCanada => "Eastern Canada",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns a copy of the frame with a `region` column derived from the
/// state column. States without a mapping get a null region.
pub(crate) fn assign_regions(frame: &DataFrame) -> Result<DataFrame, PolarsError> {
    let states = frame.column(COL_STATE)?.str()?;
    let regions: Vec<Option<&str>> = states
        .into_iter()
        .map(|state| state.and_then(Region::from_state).map(|r| r.label()))
        .collect();

    let mut out = frame.clone();
    out.with_column(Series::new(COL_REGION.into(), regions))?;
    Ok(out)
}
