use crate::cleaning::error::CleaningError;
use log::{info, warn};
use reqwest::Client;

/// Fetches the raw HTML of the source page.
///
/// The contact email is sent as part of the `User-Agent` header so the
/// source can identify polite scrapers; it is never used as authentication.
pub(crate) struct PageFetcher {
    client: Client,
    retries: u32,
}

/// Connection and body-read failures may succeed on a second attempt; an
/// HTTP error status is the server's answer and is taken at face value.
fn is_transient(err: &CleaningError) -> bool {
    matches!(
        err,
        CleaningError::Network(..) | CleaningError::Body(..)
    )
}

impl PageFetcher {
    pub(crate) fn new(client: Client, retries: u32) -> Self {
        Self { client, retries }
    }

    /// Downloads the page body, retrying transient network failures up to
    /// the configured number of times. Non-2xx responses are not retried.
    pub(crate) async fn fetch(&self, url: &str, email: &str) -> Result<String, CleaningError> {
        let user_agent = format!("snowline/{} (+{})", env!("CARGO_PKG_VERSION"), email);
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once(url, &user_agent).await {
                Ok(body) => return Ok(body),
                Err(err) if is_transient(&err) && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        "Fetch attempt {}/{} for {} failed: {}",
                        attempt,
                        self.retries + 1,
                        url,
                        err
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_once(&self, url: &str, user_agent: &str) -> Result<String, CleaningError> {
        info!("Downloading resort table from {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| CleaningError::Network(url.to_string(), e))?;

        let response = response.error_for_status().map_err(|e| {
            warn!("HTTP error for {}: {:?}", url, e);
            if let Some(status) = e.status() {
                CleaningError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                CleaningError::Network(url.to_string(), e)
            }
        })?;

        let body = response
            .text()
            .await
            .map_err(|e| CleaningError::Body(url.to_string(), e))?;

        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
