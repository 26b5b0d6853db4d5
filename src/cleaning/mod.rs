//! The cleaning pipeline: fetch the source page, pull out the resort
//! comparison table, normalize its cells and drop malformed rows.

pub(crate) mod error;
pub(crate) mod fetch;
pub(crate) mod normalize;
pub(crate) mod parse;

use crate::cleaning::error::CleaningError;
use crate::cleaning::fetch::PageFetcher;
use crate::error::SnowlineError;
use crate::snowline::Snowline;
use crate::types::cleaned_table::CleanedTable;
use log::info;

/// Runs the full cleaning pipeline with default settings.
///
/// Fetches the page at `url` (identifying the caller via `email` in the
/// `User-Agent` header), locates the resort table, cleans it and returns a
/// [`CleanedTable`]. Equivalent to building a default [`Snowline`] client
/// and calling [`Snowline::run_cleaning_pipeline`].
///
/// # Errors
///
/// Returns [`CleaningError::Network`] or [`CleaningError::HttpStatus`]
/// (wrapped in [`SnowlineError`]) when the source is unreachable or refuses
/// the request, and a parse-shaped variant such as
/// [`CleaningError::TableNotFound`] when the page does not contain the
/// expected table. No partial table is returned on failure.
pub async fn run_cleaning_pipeline(url: &str, email: &str) -> Result<CleanedTable, SnowlineError> {
    let client = Snowline::builder().build()?;
    client.run_cleaning_pipeline(url, email).await
}

pub(crate) async fn run(
    fetcher: &PageFetcher,
    url: &str,
    email: &str,
    table_index: Option<usize>,
) -> Result<CleanedTable, CleaningError> {
    info!("Running cleaning pipeline for {}", url);

    let body = fetcher.fetch(url, email).await?;
    let raw = parse::resort_table(&body, table_index, url)?;
    let (frame, dropped) = normalize::build_cleaned_frame(&raw, url)?;

    info!(
        "Cleaning complete: {} rows kept, {} dropped",
        frame.height(),
        dropped
    );
    Ok(CleanedTable::new(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cleaned_table::{COL_AVG_SNOWFALL_IN, COL_RESORT};
    use httpmock::prelude::*;

    fn resort_page() -> String {
        let mut rows = String::new();
        for (resort, city, state, snow) in [
            ("ResortA", "Denver", "Colorado", "120in"),
            ("ResortB", "Provo", "Utah", "bad"),
            ("ResortC[2]", "Girdwood", "Alaska", "643"),
        ] {
            rows.push_str(&format!(
                "<tr><td>{resort}</td><td>{city}</td><td>{state}</td>\
                 <td>11000</td><td>9000</td><td>2000</td><td>1500</td>\
                 <td>100</td><td>10</td><td>{snow}</td><td>[1]</td></tr>"
            ));
        }
        format!(
            "<html><body><table class=\"wikitable\">\
             <tr><th>Resort name</th><th>Nearest city</th><th>State/Province</th>\
             <th>Peak elevation (ft)</th><th>Base elevation (ft)</th>\
             <th>Vertical drop (ft)</th><th>Skiable acreage</th>\
             <th>Total trails</th><th>Total lifts</th>\
             <th>Average annual snowfall (in)</th><th>Citations</th></tr>\
             {rows}</table></body></html>"
        )
    }

    #[tokio::test]
    async fn cleans_scraped_table_and_drops_bad_rows() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/wiki/resorts");
                then.status(200)
                    .header("content-type", "text/html")
                    .body(resort_page());
            })
            .await;

        let table = run_cleaning_pipeline(&server.url("/wiki/resorts"), "test@example.com")
            .await
            .unwrap();
        mock.assert_async().await;

        assert_eq!(table.height(), 2);
        let resorts = table.frame.column(COL_RESORT).unwrap().str().unwrap();
        assert_eq!(resorts.get(0), Some("ResortA"));
        assert_eq!(resorts.get(1), Some("ResortC"));
        let snow = table
            .frame
            .column(COL_AVG_SNOWFALL_IN)
            .unwrap()
            .f64()
            .unwrap();
        assert_eq!(snow.get(0), Some(120.0));
    }

    #[tokio::test]
    async fn sends_contact_email_in_user_agent() {
        let server = MockServer::start_async().await;
        let expected_agent = format!(
            "snowline/{} (+scraper@example.org)",
            env!("CARGO_PKG_VERSION")
        );
        let mock = server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/wiki/resorts")
                    .header("user-agent", expected_agent);
                then.status(200)
                    .header("content-type", "text/html")
                    .body(resort_page());
            })
            .await;

        run_cleaning_pipeline(&server.url("/wiki/resorts"), "scraper@example.org")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_source_is_a_network_error() {
        // Nothing listens on this port.
        let err = run_cleaning_pipeline("http://127.0.0.1:9/wiki", "test@example.com")
            .await
            .unwrap_err();
        let SnowlineError::Cleaning(err) = err else {
            panic!("expected cleaning error, got {err:?}");
        };
        assert!(err.is_network());
        assert!(matches!(err, CleaningError::Network(..)));
    }

    #[tokio::test]
    async fn non_2xx_response_is_an_http_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/wiki/resorts");
                then.status(404);
            })
            .await;

        let err = run_cleaning_pipeline(&server.url("/wiki/resorts"), "test@example.com")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SnowlineError::Cleaning(CleaningError::HttpStatus { status, .. })
                if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn page_without_resort_table_is_a_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/wiki/resorts");
                then.status(200)
                    .header("content-type", "text/html")
                    .body("<html><body><p>No tables here.</p></body></html>");
            })
            .await;

        let err = run_cleaning_pipeline(&server.url("/wiki/resorts"), "test@example.com")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SnowlineError::Cleaning(CleaningError::TableNotFound(_))
        ));
    }

    #[tokio::test]
    async fn retries_are_opt_in() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/wiki/resorts");
                then.status(200)
                    .header("content-type", "text/html")
                    .body(resort_page());
            })
            .await;

        // A retry budget must not change behavior on a healthy source.
        let client = Snowline::builder().retries(2).build().unwrap();
        let table = client
            .run_cleaning_pipeline(&server.url("/wiki/resorts"), "test@example.com")
            .await
            .unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn exhausted_retries_still_yield_a_network_error() {
        // Nothing listens on this port, so every attempt fails the same way.
        let client = Snowline::builder().retries(2).build().unwrap();
        let err = client
            .run_cleaning_pipeline("http://127.0.0.1:9/wiki", "test@example.com")
            .await
            .unwrap_err();
        let SnowlineError::Cleaning(err) = err else {
            panic!("expected cleaning error, got {err:?}");
        };
        assert!(matches!(err, CleaningError::Network(..)));
    }

    #[tokio::test]
    async fn error_status_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/wiki/resorts");
                then.status(404);
            })
            .await;

        // A 404 is a definitive answer; the retry budget only covers
        // transient failures.
        let client = Snowline::builder().retries(2).build().unwrap();
        let err = client
            .run_cleaning_pipeline(&server.url("/wiki/resorts"), "test@example.com")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SnowlineError::Cleaning(CleaningError::HttpStatus { status, .. })
                if status == reqwest::StatusCode::NOT_FOUND
        ));
        assert_eq!(mock.hits_async().await, 1);
    }
}
