// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage: miles [-d DESTINATION] [-n CPUS] [-f FILETYPES]... URL
//
// clap takes care of validation before any crawling starts:
// - unknown flags or a missing URL -> usage error
// - file types outside jpg/mp3/pdf/png -> usage error
// - zero parallelism -> usage error
// =============================================================================

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::crawl::FileType;

// Used when no -f flag is given
pub const DEFAULT_FILE_TYPES: [FileType; 4] =
    [FileType::Mp3, FileType::Png, FileType::Jpg, FileType::Pdf];

#[derive(Parser, Debug)]
#[command(
    name = "miles",
    version,
    about = "Crawl a web page for files and download them in parallel",
    long_about = "Crawl the given URL for the specified FILETYPES and download the files to the \
                  DESTINATION folder using CPUS parallel downloads."
)]
pub struct Cli {
    /// Page to crawl (e.g., https://example.com/gallery/)
    pub url: String,

    /// Save the files to this folder (created if missing)
    #[arg(short = 'd', long, value_name = "DESTINATION", default_value = ".")]
    pub destination: PathBuf,

    /// Number of downloads to run in parallel
    #[arg(short = 'n', long = "cpus", value_name = "CPUS", default_value = "1")]
    pub parallelism: NonZeroUsize,

    /// File types to look for: jpg, mp3, pdf, png (default: all)
    ///
    /// Either -f jpg,png or -f jpg -f png
    #[arg(
        short = 'f',
        long = "filetypes",
        value_name = "FILETYPES",
        value_enum,
        value_delimiter = ','
    )]
    pub file_types: Vec<FileType>,

    /// Give up on a single request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Log debug details to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn file_types(&self) -> &[FileType] {
        if self.file_types.is_empty() {
            &DEFAULT_FILE_TYPES
        } else {
            &self.file_types
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
