// src/crawl/http.rs
// =============================================================================
// Shared HTTP plumbing for the extractor and the downloader.
//
// - One reqwest Client is built per run and cloned into every task
//   (cloning is cheap, it shares the connection pool)
// - Every fetch is a single plain GET: no retries, no custom headers
// - Any non-2xx status counts as a failure, same as a transport error
// =============================================================================

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use super::error::FetchError;

// Builds the HTTP client used for the whole crawl
//
// Parameters:
//   timeout: optional per-request timeout; None means wait forever
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder();

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

// Sends one GET request and checks the status code
//
// Returns the response with its body still unread, so callers can
// decide whether they want text (pages) or bytes (files).
pub async fn fetch(client: &Client, url: &str) -> Result<Response, FetchError> {
    debug!(%url, "GET");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::network(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}
