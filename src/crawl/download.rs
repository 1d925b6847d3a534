// src/crawl/download.rs
// =============================================================================
// This module downloads a single file into the destination folder.
//
// Key behaviour:
// - Prints "Downloading <url>..." before the request goes out
// - Exactly one GET, no retries
// - File name = last path segment of the URL (a trailing '/' is dropped)
// - Existing files with that name are overwritten, so two URLs that end
//   in the same segment clobber each other (last writer wins)
// - The reported size is read back from disk, not from Content-Length
//
// Safe to call from many tasks at once: the only shared thing is the
// destination directory.
// =============================================================================

use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::debug;

use super::error::FetchError;
use super::http::fetch;

// Outcome of one download attempt
#[derive(Debug)]
pub enum DownloadResult {
    /// File written to `path`, `bytes` long
    Saved { path: PathBuf, bytes: u64 },
    /// Nothing usable was saved for `url`
    Failed { url: String, reason: FetchError },
}

// Downloads `url` into `destination`
//
// Parameters:
//   client: shared HTTP client
//   url: absolute URL of the file
//   destination: existing directory to write into
pub async fn download_url(client: &Client, url: &str, destination: &Path) -> DownloadResult {
    // Progress line goes out before the request does
    println!("Downloading {}...", url);

    match save(client, url, destination).await {
        Ok((path, bytes)) => {
            debug!(%url, path = %path.display(), bytes, "saved");
            DownloadResult::Saved { path, bytes }
        }
        // The caller decides how to report it
        Err(reason) => {
            debug!(%url, error = %reason, "giving up on url");
            DownloadResult::Failed {
                url: url.to_string(),
                reason,
            }
        }
    }
}

async fn save(client: &Client, url: &str, destination: &Path) -> Result<(PathBuf, u64), FetchError> {
    let response = fetch(client, url).await?;
    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::network(url, e))?;

    let path = destination.join(file_name(url));
    tokio::fs::write(&path, &body)
        .await
        .map_err(|e| FetchError::io(path.clone(), e))?;

    let bytes = tokio::fs::metadata(&path)
        .await
        .map_err(|e| FetchError::io(path.clone(), e))?
        .len();

    Ok((path, bytes))
}

// Last path segment of `url`, after dropping one trailing '/'
//
// Works on the URL text as given, so a query string stays part of the
// name ("a.jpg?v=2").
pub fn file_name(url: &str) -> &str {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::fs instead of std::fs?
//    - std::fs blocks the worker thread while the disk works
//    - tokio::fs hands the work to a blocking pool so other downloads
//      keep making progress
//
// 2. Why read the size back with metadata()?
//    - Servers using chunked transfer don't send Content-Length
//    - The file on disk is the only number we can trust
// -----------------------------------------------------------------------------
