use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while fetching and cleaning the raw resort table.
///
/// The `Network`/`HttpStatus` variants cover an unreachable or refusing
/// source; the remaining variants cover content that does not match the
/// expected tabular structure.
#[derive(Debug, Error)]
pub enum CleaningError {
    #[error("Network request failed for {0}")]
    Network(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),

    #[error("No ski resort table found in page at {0}")]
    TableNotFound(String),

    #[error("Requested table index {index} out of range, page at {url} has {available} tables")]
    TableIndexOutOfRange {
        url: String,
        index: usize,
        available: usize,
    },

    #[error("Table from {url} has {found} columns, expected at least {expected}")]
    HeaderMismatch {
        url: String,
        expected: usize,
        found: usize,
    },

    #[error("Failed to read CSV '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to write CSV '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("CSV '{path}' is missing required column '{column}'")]
    CsvMissingColumn { path: PathBuf, column: String },

    #[error("Failed to assemble cleaned table")]
    Frame(#[from] PolarsError),
}

impl CleaningError {
    /// True when the failure happened on the wire rather than in parsing.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            CleaningError::Network(..) | CleaningError::HttpStatus { .. } | CleaningError::Body(..)
        )
    }
}
