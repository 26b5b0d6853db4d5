mod analysis;
mod cleaning;
mod error;
mod filtering;
mod snowline;
mod types;

pub use error::SnowlineError;
pub use snowline::*;

pub use analysis::run_analysis_pipeline;
pub use cleaning::run_cleaning_pipeline;

pub use analysis::error::AnalysisError;
pub use analysis::summary::{GroupMean, ResortSnowfall, SummaryResult};
pub use cleaning::error::CleaningError;

pub use filtering::SnowlineFrameExt;

pub use types::cleaned_table::*;
pub use types::region::Region;
pub use types::resort::ResortRecord;
