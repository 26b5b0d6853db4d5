use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the analysis pipeline. `EmptyTable` and
/// `MissingColumn` are the minimum-shape validation failures; the rest
/// surface while computing aggregates or writing chart artifacts.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Cleaned table is empty, nothing to analyze")]
    EmptyTable,

    #[error("Cleaned table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Failed to create plot directory '{0}'")]
    PlotDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),

    #[error("Failed to serialize summary")]
    Serialize(#[from] serde_json::Error),
}
