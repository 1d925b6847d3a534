// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr) and make sure the destination folder exists
// 3. Crawl the page and download everything that matches
// 4. Print the report (text or JSON) and exit
//
// Exit codes: 0 = crawl completed (even with zero downloads), 2 = error
// before the crawl could start
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;   // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - extraction, downloading, reporting

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use crawl::{CrawlReport, CrawlRequest, FileTypeCatalog};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// The #[tokio::main] attribute builds a multi-threaded runtime, so the
// download tasks really run side by side
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    debug!(?cli, "arguments parsed");

    tokio::fs::create_dir_all(&cli.destination)
        .await
        .with_context(|| format!("cannot create destination {}", cli.destination.display()))?;

    let request = CrawlRequest::new(
        cli.url.clone(),
        cli.file_types(),
        cli.destination.clone(),
        cli.parallelism,
    );

    let client = crawl::build_client(cli.timeout()).context("cannot build HTTP client")?;
    let catalog = FileTypeCatalog::new().context("invalid file type pattern")?;

    let report = crawl::crawl(&client, &catalog, &request).await;

    print_report(&report, cli.json)?;

    Ok(0)
}

// Logs go to stderr so stdout only carries progress lines and the report.
// RUST_LOG wins over --verbose when set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "miles=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(&report.summary())?;
        println!("{}", json_output);
    } else {
        println!("{}", report);
    }
    Ok(())
}
