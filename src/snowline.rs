//! This module provides the main entry point for the snowline pipelines.
//! A [`Snowline`] client carries the HTTP client and the small set of
//! configuration knobs; the two pipeline methods mirror the crate-level
//! [`crate::run_cleaning_pipeline`] / [`crate::run_analysis_pipeline`]
//! convenience functions.

use crate::analysis;
use crate::analysis::summary::SummaryResult;
use crate::cleaning;
use crate::cleaning::fetch::PageFetcher;
use crate::error::SnowlineError;
use crate::types::cleaned_table::CleanedTable;
use bon::bon;
use std::path::PathBuf;
use std::time::Duration;

/// The page the original project scrapes; callers can point the cleaning
/// pipeline at any page with the same table shape.
pub const DEFAULT_SOURCE_URL: &str =
    "https://en.wikipedia.org/wiki/Comparison_of_North_American_ski_resorts";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_PLOT_DIR: &str = "plots";

/// The client for the scraping and analysis pipelines.
///
/// Holds the HTTP client plus configuration; each pipeline call operates on
/// its own table instance, so one client can be reused freely.
///
/// # Examples
///
/// ```no_run
/// # use snowline::{Snowline, SnowlineError, DEFAULT_SOURCE_URL};
/// # async fn run() -> Result<(), SnowlineError> {
/// let client = Snowline::builder()
///     .retries(2)
///     .plot_dir("out/plots".into())
///     .build()?;
/// let table = client
///     .run_cleaning_pipeline(DEFAULT_SOURCE_URL, "you@example.com")
///     .await?;
/// let summary = client.run_analysis_pipeline(&table)?;
/// println!("{}", summary.to_json()?);
/// # Ok(())
/// # }
/// ```
pub struct Snowline {
    fetcher: PageFetcher,
    plot_dir: PathBuf,
    table_index: Option<usize>,
}

#[bon]
impl Snowline {
    /// Builds a client.
    ///
    /// * `timeout` - per-request timeout for the source fetch (default 15 s).
    /// * `retries` - extra fetch attempts after a network failure
    ///   (default 0; retrying is strictly opt-in).
    /// * `plot_dir` - where the analysis stage writes charts (default `plots/`).
    /// * `table_index` - pick the n-th table on the page instead of
    ///   auto-detecting the resort table by its header.
    ///
    /// # Errors
    ///
    /// Returns [`SnowlineError::HttpClient`] if the underlying HTTP client
    /// cannot be constructed.
    #[builder]
    pub fn new(
        timeout: Option<Duration>,
        retries: Option<u32>,
        plot_dir: Option<PathBuf>,
        table_index: Option<usize>,
    ) -> Result<Self, SnowlineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(SnowlineError::HttpClient)?;
        Ok(Self {
            fetcher: PageFetcher::new(client, retries.unwrap_or(0)),
            plot_dir: plot_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_DIR)),
            table_index,
        })
    }

    /// Fetches the source page and returns the cleaned resort table.
    ///
    /// `email` is sent inside the `User-Agent` header so the source can
    /// identify the scraper; it is not authentication.
    ///
    /// # Errors
    ///
    /// [`crate::CleaningError::Network`] / [`crate::CleaningError::HttpStatus`]
    /// when the source is unreachable or refuses the request, parse-shaped
    /// variants when the page does not contain the expected table.
    pub async fn run_cleaning_pipeline(
        &self,
        url: &str,
        email: &str,
    ) -> Result<CleanedTable, SnowlineError> {
        Ok(cleaning::run(&self.fetcher, url, email, self.table_index).await?)
    }

    /// Computes summary statistics over a cleaned table and writes the
    /// chart artifacts into the configured plot directory.
    ///
    /// # Errors
    ///
    /// [`crate::AnalysisError::EmptyTable`] / [`crate::AnalysisError::MissingColumn`]
    /// when the table fails the minimum-shape checks.
    pub fn run_analysis_pipeline(
        &self,
        table: &CleanedTable,
    ) -> Result<SummaryResult, SnowlineError> {
        Ok(analysis::run(table, &self.plot_dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_are_usable() {
        let client = Snowline::builder().build().unwrap();
        assert_eq!(client.plot_dir, PathBuf::from("plots"));
        assert_eq!(client.table_index, None);
    }

    #[test]
    fn builder_accepts_overrides() {
        let client = Snowline::builder()
            .timeout(Duration::from_secs(1))
            .retries(3)
            .plot_dir("out".into())
            .table_index(4)
            .build()
            .unwrap();
        assert_eq!(client.plot_dir, PathBuf::from("out"));
        assert_eq!(client.table_index, Some(4));
    }
}
