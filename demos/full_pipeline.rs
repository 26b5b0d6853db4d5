//! demos/full_pipeline.rs
//!
//! Scrapes the ski resort comparison table, cleans it, and runs the
//! analysis pipeline end to end. Pass a contact email as the first
//! argument so the source can identify the scraper.
//!
//! To run: cargo run --example full_pipeline -- you@example.com

use snowline::{Snowline, DEFAULT_SOURCE_URL};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "snowline-demo@example.com".to_string());

    println!("Fetching resort table from {DEFAULT_SOURCE_URL}...");
    let client = Snowline::builder().retries(1).build()?;
    let table = client
        .run_cleaning_pipeline(DEFAULT_SOURCE_URL, &email)
        .await?;
    println!("Cleaned table with {} rows:", table.height());
    println!("{}", table.frame.head(Some(5)));

    let summary = client.run_analysis_pipeline(&table)?;
    println!("{}", summary.to_json()?);
    println!("Charts written to the plots/ directory.");

    table.write_csv("ski_resorts_cleaned.csv".as_ref())?;
    println!("Cleaned table saved to ski_resorts_cleaned.csv.");

    Ok(())
}
