//! The `CleanedTable` wrapper around the normalized resort frame, plus the
//! canonical column names shared by the cleaning and analysis stages.

use crate::cleaning::error::CleaningError;
use crate::types::region::assign_regions;
use crate::types::resort::ResortRecord;
use polars::prelude::*;
use std::path::Path;

pub const COL_RESORT: &str = "resort";
pub const COL_NEAREST_CITY: &str = "nearest_city";
pub const COL_STATE: &str = "state";
pub const COL_PEAK_ELEVATION_FT: &str = "peak_elevation_ft";
pub const COL_BASE_ELEVATION_FT: &str = "base_elevation_ft";
pub const COL_VERTICAL_DROP_FT: &str = "vertical_drop_ft";
pub const COL_SKIABLE_ACRES: &str = "skiable_acres";
pub const COL_TOTAL_TRAILS: &str = "total_trails";
pub const COL_TOTAL_LIFTS: &str = "total_lifts";
pub const COL_AVG_SNOWFALL_IN: &str = "avg_snowfall_in";

/// Every column the cleaned frame carries, in schema order.
pub const EXPECTED_COLUMNS: [&str; 10] = [
    COL_RESORT,
    COL_NEAREST_CITY,
    COL_STATE,
    COL_PEAK_ELEVATION_FT,
    COL_BASE_ELEVATION_FT,
    COL_VERTICAL_DROP_FT,
    COL_SKIABLE_ACRES,
    COL_TOTAL_TRAILS,
    COL_TOTAL_LIFTS,
    COL_AVG_SNOWFALL_IN,
];

/// The numeric subset of [`EXPECTED_COLUMNS`], all stored as `f64`.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    COL_PEAK_ELEVATION_FT,
    COL_BASE_ELEVATION_FT,
    COL_VERTICAL_DROP_FT,
    COL_SKIABLE_ACRES,
    COL_TOTAL_TRAILS,
    COL_TOTAL_LIFTS,
    COL_AVG_SNOWFALL_IN,
];

/// A wrapper around a Polars `DataFrame` holding the cleaned resort table.
///
/// Invariant: every row has a non-empty `resort` name and a non-null
/// numeric `avg_snowfall_in` value. The cleaning pipeline enforces this by
/// dropping malformed rows; [`CleanedTable::from_csv`] re-applies the same
/// filter when loading a previously saved table.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// The underlying frame with the [`EXPECTED_COLUMNS`] schema.
    pub frame: DataFrame,
}

impl CleanedTable {
    /// Wraps a frame that already satisfies the cleaned-table invariant.
    ///
    /// This is typically called by the cleaning pipeline; the analysis
    /// pipeline re-validates shape before computing anything.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Number of rows in the table.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Hands out a `LazyFrame` for ad-hoc queries, e.g. through
    /// [`crate::SnowlineFrameExt`].
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Returns a copy of the frame with a `region` column derived from the
    /// state column, the shape [`crate::SnowlineFrameExt::filter_by_region`]
    /// expects. States without a mapping get a null region.
    pub fn with_regions(&self) -> Result<DataFrame, PolarsError> {
        assign_regions(&self.frame)
    }

    /// Collects the table into typed [`ResortRecord`] rows.
    pub fn resorts(&self) -> Result<Vec<ResortRecord>, PolarsError> {
        ResortRecord::from_frame(&self.frame)
    }

    /// Loads a cleaned table previously written with [`CleanedTable::write_csv`].
    ///
    /// Numeric columns are cast to `f64` and rows violating the
    /// cleaned-table invariant are dropped, so a hand-edited CSV cannot
    /// smuggle malformed rows into the analysis stage.
    pub fn from_csv(path: &Path) -> Result<Self, CleaningError> {
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| CleaningError::CsvRead(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| CleaningError::CsvRead(path.to_path_buf(), e))?;

        for column in EXPECTED_COLUMNS {
            if frame.column(column).is_err() {
                return Err(CleaningError::CsvMissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let casts: Vec<Expr> = NUMERIC_COLUMNS
            .iter()
            .map(|c| col(*c).cast(DataType::Float64))
            .collect();
        let frame = frame
            .lazy()
            .with_columns(casts)
            .filter(
                col(COL_RESORT)
                    .is_not_null()
                    .and(col(COL_RESORT).neq(lit("")))
                    .and(col(COL_AVG_SNOWFALL_IN).is_not_null()),
            )
            .collect()
            .map_err(|e| CleaningError::CsvRead(path.to_path_buf(), e))?;

        Ok(Self::new(frame))
    }

    /// Writes the table as CSV, matching the original project's disposable
    /// `ski_resorts_cleaned.csv` artifact.
    pub fn write_csv(&self, path: &Path) -> Result<(), CleaningError> {
        let file = std::fs::File::create(path)
            .map_err(|e| CleaningError::CsvWrite(path.to_path_buf(), PolarsError::from(e)))?;
        let mut frame = self.frame.clone();
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut frame)
            .map_err(|e| CleaningError::CsvWrite(path.to_path_buf(), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> CleanedTable {
        let frame = df!(
            COL_RESORT => vec!["ResortA".to_string(), "ResortB".to_string()],
            COL_NEAREST_CITY => vec![Some("Denver".to_string()), None],
            COL_STATE => vec![Some("Colorado".to_string()), Some("Utah".to_string())],
            COL_PEAK_ELEVATION_FT => vec![Some(13000.0), Some(11000.0)],
            COL_BASE_ELEVATION_FT => vec![Some(9000.0), None],
            COL_VERTICAL_DROP_FT => vec![Some(4000.0), None],
            COL_SKIABLE_ACRES => vec![Some(1500.0), None],
            COL_TOTAL_TRAILS => vec![Some(100.0), None],
            COL_TOTAL_LIFTS => vec![Some(10.0), None],
            COL_AVG_SNOWFALL_IN => vec![300.0, 500.0],
        )
        .unwrap();
        CleanedTable::new(frame)
    }

    #[test]
    fn csv_round_trip_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");

        let table = sample_table();
        table.write_csv(&path).unwrap();
        let loaded = CleanedTable::from_csv(&path).unwrap();

        assert_eq!(loaded.height(), 2);
        let snow = loaded
            .frame
            .column(COL_AVG_SNOWFALL_IN)
            .unwrap()
            .f64()
            .unwrap();
        assert_eq!(snow.get(1), Some(500.0));
    }

    #[test]
    fn from_csv_rejects_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "resort,avg_snowfall_in\nResortA,120\n").unwrap();

        let err = CleanedTable::from_csv(&path).unwrap_err();
        assert!(matches!(err, CleaningError::CsvMissingColumn { .. }));
    }

    #[test]
    fn from_csv_drops_rows_without_snowfall() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        let header = EXPECTED_COLUMNS.join(",");
        std::fs::write(
            &path,
            format!(
                "{header}\n\
                 ResortA,Denver,Colorado,13000,9000,4000,1500,100,10,300\n\
                 ResortB,Provo,Utah,11000,,,,,,\n"
            ),
        )
        .unwrap();

        let loaded = CleanedTable::from_csv(&path).unwrap();
        assert_eq!(loaded.height(), 1);
    }

    #[test]
    fn typed_extraction_reads_each_row() {
        let records = sample_table().resorts().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].resort, "ResortA");
        assert_eq!(records[0].avg_snowfall_in, 300.0);
        assert_eq!(records[1].nearest_city, None);
        assert_eq!(records[1].base_elevation_ft, None);
    }

    #[test]
    fn typed_extraction_rejects_rows_breaking_the_invariant() {
        let mut table = sample_table();
        let snow = Series::new(
            COL_AVG_SNOWFALL_IN.into(),
            vec![Some(300.0), None::<f64>],
        );
        table.frame.with_column(snow).unwrap();
        assert!(table.resorts().is_err());

        let mut table = sample_table();
        let names = Series::new(
            COL_RESORT.into(),
            vec!["ResortA".to_string(), String::new()],
        );
        table.frame.with_column(names).unwrap();
        assert!(table.resorts().is_err());
    }
}
