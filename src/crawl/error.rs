// src/crawl/error.rs
// =============================================================================
// Errors that can happen while fetching a page or saving a file.
//
// None of these ever stop a crawl. The extractor turns them into an empty
// link list and the downloader turns them into DownloadResult::Failed.
// We still keep them typed so the logs say exactly what went wrong.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status code
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// DNS, connection, TLS, timeout or body read failure
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Writing or inspecting the saved file failed
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
