//! demos/analyze_csv.rs
//!
//! Runs the analysis pipeline over a previously saved cleaned table,
//! skipping the network fetch entirely.
//!
//! To run: cargo run --example analyze_csv -- ski_resorts_cleaned.csv

use snowline::{run_analysis_pipeline, CleanedTable};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ski_resorts_cleaned.csv".to_string())
        .into();

    let table = CleanedTable::from_csv(&path)?;
    println!("Loaded {} cleaned rows from {}", table.height(), path.display());

    let summary = run_analysis_pipeline(&table)?;
    for resort in summary.top_resorts.iter().take(5) {
        println!(
            "{:<30} {:>6.0} in ({})",
            resort.resort,
            resort.mean_snowfall,
            resort.state.as_deref().unwrap_or("unknown")
        );
    }
    println!("Charts written to the plots/ directory.");

    Ok(())
}
