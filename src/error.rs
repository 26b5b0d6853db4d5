use crate::analysis::error::AnalysisError;
use crate::cleaning::error::CleaningError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnowlineError {
    #[error(transparent)]
    Cleaning(#[from] CleaningError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
