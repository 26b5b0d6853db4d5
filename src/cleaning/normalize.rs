use crate::cleaning::error::CleaningError;
use crate::cleaning::parse::RawTable;
use crate::types::cleaned_table::{
    COL_AVG_SNOWFALL_IN, COL_BASE_ELEVATION_FT, COL_NEAREST_CITY, COL_PEAK_ELEVATION_FT,
    COL_RESORT, COL_SKIABLE_ACRES, COL_STATE, COL_TOTAL_LIFTS, COL_TOTAL_TRAILS,
    COL_VERTICAL_DROP_FT, EXPECTED_COLUMNS,
};
use polars::prelude::*;
use regex::Regex;

// Position of each field within the scraped table, after the trailing
// citation column has been discarded.
const IDX_RESORT: usize = 0;
const IDX_NEAREST_CITY: usize = 1;
const IDX_STATE: usize = 2;
const IDX_PEAK_ELEVATION: usize = 3;
const IDX_BASE_ELEVATION: usize = 4;
const IDX_VERTICAL_DROP: usize = 5;
const IDX_SKIABLE_ACRES: usize = 6;
const IDX_TOTAL_TRAILS: usize = 7;
const IDX_TOTAL_LIFTS: usize = 8;
const IDX_AVG_SNOWFALL: usize = 9;

/// Strips bracketed reference markers like `[3]` and trims whitespace.
pub(crate) fn strip_brackets(text: &str, bracket_re: &Regex) -> String {
    bracket_re.replace_all(text, "").trim().to_string()
}

/// Coerces a scraped cell to a number by dropping every character except
/// digits and the decimal point, so `"120in"` becomes `120.0` and `"1,234"`
/// becomes `1234.0`. Cells without any digits yield `None`.
pub(crate) fn clean_numeric(value: &str) -> Option<f64> {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Turns a raw scraped table into the cleaned, typed frame.
///
/// Rows missing a resort name or a numeric snowfall value are dropped
/// outright; no imputation. Returns the frame plus the number of rows that
/// were dropped.
pub(crate) fn build_cleaned_frame(
    raw: &RawTable,
    url: &str,
) -> Result<(DataFrame, usize), CleaningError> {
    if raw.headers.len() < EXPECTED_COLUMNS.len() {
        return Err(CleaningError::HeaderMismatch {
            url: url.to_string(),
            expected: EXPECTED_COLUMNS.len(),
            found: raw.headers.len(),
        });
    }

    let bracket_re = Regex::new(r"\[.*?\]").unwrap();

    let mut resorts: Vec<String> = Vec::new();
    let mut cities: Vec<Option<String>> = Vec::new();
    let mut states: Vec<Option<String>> = Vec::new();
    let mut peak_elevations: Vec<Option<f64>> = Vec::new();
    let mut base_elevations: Vec<Option<f64>> = Vec::new();
    let mut vertical_drops: Vec<Option<f64>> = Vec::new();
    let mut skiable_acres: Vec<Option<f64>> = Vec::new();
    let mut total_trails: Vec<Option<f64>> = Vec::new();
    let mut total_lifts: Vec<Option<f64>> = Vec::new();
    let mut snowfalls: Vec<f64> = Vec::new();

    let mut dropped = 0usize;
    for row in &raw.rows {
        if row.len() < EXPECTED_COLUMNS.len() {
            dropped += 1;
            continue;
        }

        let resort = strip_brackets(&row[IDX_RESORT], &bracket_re);
        let snowfall = clean_numeric(&row[IDX_AVG_SNOWFALL]);
        let Some(snowfall) = snowfall else {
            dropped += 1;
            continue;
        };
        if resort.is_empty() {
            dropped += 1;
            continue;
        }

        resorts.push(resort);
        cities.push(text_cell(&row[IDX_NEAREST_CITY], &bracket_re));
        states.push(text_cell(&row[IDX_STATE], &bracket_re));
        peak_elevations.push(clean_numeric(&row[IDX_PEAK_ELEVATION]));
        base_elevations.push(clean_numeric(&row[IDX_BASE_ELEVATION]));
        vertical_drops.push(clean_numeric(&row[IDX_VERTICAL_DROP]));
        skiable_acres.push(clean_numeric(&row[IDX_SKIABLE_ACRES]));
        total_trails.push(clean_numeric(&row[IDX_TOTAL_TRAILS]));
        total_lifts.push(clean_numeric(&row[IDX_TOTAL_LIFTS]));
        snowfalls.push(snowfall);
    }

    let frame = df!(
        COL_RESORT => resorts,
        COL_NEAREST_CITY => cities,
        COL_STATE => states,
        COL_PEAK_ELEVATION_FT => peak_elevations,
        COL_BASE_ELEVATION_FT => base_elevations,
        COL_VERTICAL_DROP_FT => vertical_drops,
        COL_SKIABLE_ACRES => skiable_acres,
        COL_TOTAL_TRAILS => total_trails,
        COL_TOTAL_LIFTS => total_lifts,
        COL_AVG_SNOWFALL_IN => snowfalls,
    )?;

    Ok((frame, dropped))
}

fn text_cell(value: &str, bracket_re: &Regex) -> Option<String> {
    let cleaned = strip_brackets(value, bracket_re);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
