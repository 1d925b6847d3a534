// src/crawl/mod.rs
// =============================================================================
// This module drives a crawl from start to finish.
//
// Pipeline:
// 1. Extract: fetch the seed page once and collect matching file links
// 2. Dispatch: hand the links to at most `parallelism` concurrent downloads
// 3. Collect: add up the files that were saved (failures are skipped)
// 4. Report: count, megabytes, elapsed seconds and bandwidth
//
// A crawl never fails. An unreachable page or a batch of broken links just
// produces a report with smaller (possibly zero) numbers.
//
// Submodules:
// - resolve: relative -> absolute URLs
// - extract: file type patterns and link extraction
// - download: fetch one URL and save it
// - http: shared client + single GET helper
// - error: FetchError
// =============================================================================

mod download;
mod error;
mod extract;
mod http;
mod resolve;

pub use download::{download_url, DownloadResult};
pub use extract::{extract_urls, FileType, FileTypeCatalog};
pub use http::build_client;

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

pub const MEGABYTE: u64 = 1 << 20;

// Everything a crawl needs to know, fixed once it's built
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    base_url: String,
    file_types: Vec<FileType>,
    destination: PathBuf,
    parallelism: NonZeroUsize,
}

impl CrawlRequest {
    // Repeated file types are dropped, keeping the first occurrence, so
    // each type's rules run once.
    pub fn new(
        base_url: impl Into<String>,
        file_types: &[FileType],
        destination: impl Into<PathBuf>,
        parallelism: NonZeroUsize,
    ) -> Self {
        let mut unique = Vec::with_capacity(file_types.len());
        for &file_type in file_types {
            if !unique.contains(&file_type) {
                unique.push(file_type);
            }
        }

        Self {
            base_url: base_url.into(),
            file_types: unique,
            destination: destination.into(),
            parallelism,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn file_types(&self) -> &[FileType] {
        &self.file_types
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn parallelism(&self) -> NonZeroUsize {
        self.parallelism
    }
}

// Totals for one crawl, built only from saved files
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrawlReport {
    pub files_downloaded: usize,
    pub bytes_downloaded: u64,
    pub elapsed: Duration,
}

impl CrawlReport {
    pub fn megabytes(&self) -> f64 {
        self.bytes_downloaded as f64 / MEGABYTE as f64
    }

    // MB/s; 0 when no measurable time passed
    pub fn bandwidth(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds <= f64::EPSILON {
            0.0
        } else {
            self.megabytes() / seconds
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            files_downloaded: self.files_downloaded,
            bytes_downloaded: self.bytes_downloaded,
            megabytes: self.megabytes(),
            elapsed_seconds: self.elapsed.as_secs_f64(),
            bandwidth: self.bandwidth(),
        }
    }
}

// The four report lines, labels aligned
impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Files Downloaded: {}", self.files_downloaded)?;
        writeln!(f, "Bytes Downloaded: {:.2} MB", self.megabytes())?;
        writeln!(f, "Elapsed Time:     {:.2} s", self.elapsed.as_secs_f64())?;
        write!(f, "Bandwidth:        {:.2} MB/s", self.bandwidth())
    }
}

// JSON shape of a report (--json)
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub files_downloaded: usize,
    pub bytes_downloaded: u64,
    pub megabytes: f64,
    pub elapsed_seconds: f64,
    pub bandwidth: f64,
}

// Runs the whole pipeline for `request`
//
// Parameters:
//   client: shared HTTP client (used for the page and every file)
//   catalog: compiled pattern rules
//   request: what to crawl and where to put it
pub async fn crawl(client: &Client, catalog: &FileTypeCatalog, request: &CrawlRequest) -> CrawlReport {
    let links = extract_urls(client, catalog, request.base_url(), request.file_types()).await;

    let report = download_all(client, links, request.destination(), request.parallelism()).await;

    info!(
        url = %request.base_url(),
        files = report.files_downloaded,
        bytes = report.bytes_downloaded,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "crawl finished"
    );

    report
}

// Downloads every URL with at most `parallelism` in flight and totals the results
//
// The clock covers dispatch and collection only. Results arrive in
// completion order, which doesn't matter because we only sum them.
pub async fn download_all<I>(
    client: &Client,
    urls: I,
    destination: &Path,
    parallelism: NonZeroUsize,
) -> CrawlReport
where
    I: IntoIterator<Item = String>,
{
    // The clock starts at dispatch; extraction has already happened
    let start = Instant::now();

    // Build one task per URL, lazily
    // `map` on an iterator does nothing until buffer_unordered pulls the
    // next item, so tokio::spawn only runs when a slot is free
    let tasks = urls.into_iter().map(|url| {
        let client = client.clone(); // Client is an Arc inside, cloning is cheap
        let destination = destination.to_path_buf(); // Each task owns its own path
        tokio::spawn(async move { download_url(&client, &url, &destination).await })
    });

    // Run up to `parallelism` tasks at once, yielding results as they finish
    // (not in dispatch order, hence "unordered")
    let mut results = stream::iter(tasks).buffer_unordered(parallelism.get());

    // Running totals, only fed by saved files
    let mut files_downloaded = 0;
    let mut bytes_downloaded = 0;

    // Pull results one by one until every task has finished
    while let Some(joined) = results.next().await {
        match joined {
            // File landed on disk: count it
            Ok(DownloadResult::Saved { path, bytes }) => {
                debug!(path = %path.display(), bytes, "collected");
                files_downloaded += 1;
                bytes_downloaded += bytes;
            }
            // Failed downloads are logged and left out of the totals
            Ok(DownloadResult::Failed { url, reason }) => {
                warn!(%url, error = %reason, "download failed");
            }
            // The task itself died (panic or cancellation)
            Err(e) => {
                warn!(error = %e, "download task panicked");
            }
        }
    }

    CrawlReport {
        files_downloaded,
        bytes_downloaded,
        elapsed: start.elapsed(),
    }
}
