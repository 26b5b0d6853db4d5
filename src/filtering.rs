use crate::types::cleaned_table::{COL_AVG_SNOWFALL_IN, COL_STATE};
use crate::types::region::{Region, COL_REGION};
use polars::prelude::{col, lit, IdxSize, LazyFrame, SortMultipleOptions};

/// Convenience filters for cleaned-table frames, mirroring the questions
/// the exploratory analysis keeps asking.
pub trait SnowlineFrameExt {
    /// Keeps only resorts in the given state or province.
    ///
    /// # Example
    ///
    /// ```
    /// use polars::prelude::*;
    /// use snowline::{SnowlineFrameExt, COL_STATE, COL_AVG_SNOWFALL_IN};
    ///
    /// let frame = df!(
    ///     COL_STATE => vec!["Utah".to_string(), "Vermont".to_string()],
    ///     COL_AVG_SNOWFALL_IN => vec![500.0, 250.0],
    /// )
    /// .unwrap();
    /// let utah = frame.lazy().filter_by_state("Utah").collect().unwrap();
    /// assert_eq!(utah.height(), 1);
    /// ```
    fn filter_by_state(self, state: &str) -> LazyFrame;

    /// Keeps only resorts in the given [`Region`]. The frame must carry the
    /// `region` column; get one from
    /// [`CleanedTable::with_regions`](crate::CleanedTable::with_regions),
    /// otherwise the missing column surfaces as an error on `collect`.
    fn filter_by_region(self, region: Region) -> LazyFrame;

    /// Keeps only resorts with at least `inches` of average annual snowfall.
    fn filter_min_snowfall(self, inches: f64) -> LazyFrame;

    /// The `n` snowiest rows, most snowfall first.
    fn top_by_snowfall(self, n: usize) -> LazyFrame;
}

impl SnowlineFrameExt for LazyFrame {
    fn filter_by_state(self, state: &str) -> LazyFrame {
        self.filter(col(COL_STATE).eq(lit(state)))
    }

    fn filter_by_region(self, region: Region) -> LazyFrame {
        self.filter(col(COL_REGION).eq(lit(region.label())))
    }

    fn filter_min_snowfall(self, inches: f64) -> LazyFrame {
        self.filter(col(COL_AVG_SNOWFALL_IN).gt_eq(lit(inches)))
    }

    fn top_by_snowfall(self, n: usize) -> LazyFrame {
        self.sort(
            [COL_AVG_SNOWFALL_IN],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(n as IdxSize)
    }
}
