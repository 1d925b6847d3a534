// src/crawl/extract.rs
// =============================================================================
// This module finds file links on a single web page.
//
// How it works:
// 1. GET the page once
// 2. For each requested file type, run every pattern rule for that type
//    over the raw markup
// 3. Resolve each match against the page URL and hand it back
//
// We match with regular expressions over the raw text instead of parsing
// the HTML into a DOM. The patterns are loose on purpose: they tolerate
// broken markup, unquoted attributes and odd whitespace, and they can also
// over-match. The exact match sets depend on this, so keep it regex-based.
//
// Rust concepts:
// - HashMap: file type -> compiled rules
// - Iterator adapters: flat_map chains that walk types, rules, matches
// =============================================================================

use std::collections::HashMap;

use clap::ValueEnum; // Lets clap parse "-f jpg,png" straight into FileType
use regex::Regex; // Compiled pattern rules
use reqwest::Client;
use tracing::{debug, warn};

use super::http::fetch;
use super::resolve::resolve_url;

// The file types we know how to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FileType {
    Jpg,
    Mp3,
    Pdf,
    Png,
}

impl FileType {
    pub const ALL: [FileType; 4] = [FileType::Jpg, FileType::Mp3, FileType::Pdf, FileType::Png];

    // Pattern rules for this type, in evaluation order.
    // Capture group 1 is the raw link.
    fn patterns(self) -> &'static [&'static str] {
        match self {
            FileType::Jpg => &[r#"<img.*src="?([^" ]+.jpg)"#, r#"<a.*href="?([^" ]+.jpg)"#],
            FileType::Mp3 => &[r#"<audio.*src="?([^" ]+.mp3)"#, r#"<a.*href="?([^" ]+.mp3)"#],
            FileType::Pdf => &[r#"<a.*href="?([^" ]+.pdf)"#],
            FileType::Png => &[r#"<img.*src="?([^" ]+.png)"#, r#"<a.*href="?([^" ]+.png)"#],
        }
    }
}

// Compiled pattern rules for every file type
//
// Built once per run and shared by reference. Every FileType has at
// least one rule.
#[derive(Debug)]
pub struct FileTypeCatalog {
    rules: HashMap<FileType, Vec<Regex>>,
}

impl FileTypeCatalog {
    pub fn new() -> Result<Self, regex::Error> {
        let mut rules = HashMap::new();

        for file_type in FileType::ALL {
            let compiled = file_type
                .patterns()
                .iter()
                .map(|pattern| Regex::new(pattern))
                .collect::<Result<Vec<_>, _>>()?;
            rules.insert(file_type, compiled);
        }

        Ok(Self { rules })
    }

    pub fn rules(&self, file_type: FileType) -> &[Regex] {
        self.rules
            .get(&file_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Runs the rules for each requested type over `body`, yielding raw
    // (unresolved) links.
    //
    // Order: file type order, then rule order, then position in the text.
    // Nothing is de-duplicated.
    pub fn find_links<'a>(
        &'a self,
        body: &'a str,
        file_types: &'a [FileType],
    ) -> impl Iterator<Item = &'a str> + 'a {
        file_types.iter().flat_map(move |&file_type| {
            self.rules(file_type).iter().flat_map(move |rule| {
                rule.captures_iter(body)
                    .filter_map(|captures| captures.get(1))
                    .map(|m| m.as_str())
            })
        })
    }
}

// The links found on a page: finite and consumed once.
// Calling extract_urls again fetches the page again.
pub type Links = std::vec::IntoIter<String>;

// Fetches `page_url` and returns absolute URLs of the requested file types
//
// If the page can't be fetched (network error, non-2xx status, body that
// isn't text) the result is simply empty. The crawl carries on with
// nothing to download instead of failing.
pub async fn extract_urls(
    client: &Client,
    catalog: &FileTypeCatalog,
    page_url: &str,
    file_types: &[FileType],
) -> Links {
    // One GET for the page; any failure ends with an empty link list
    let body = match fetch(client, page_url).await {
        // Got a 2xx: read the body as text
        Ok(response) => match response.text().await {
            Ok(body) => body,
            // Connection dropped mid-body or the bytes couldn't be decoded
            Err(e) => {
                warn!(url = %page_url, error = %e, "failed to read page body");
                return Vec::new().into_iter();
            }
        },
        // Transport error or non-2xx status
        Err(e) => {
            warn!(url = %page_url, error = %e, "seed page unreachable, nothing to crawl");
            return Vec::new().into_iter();
        }
    };

    // Walk every rule for every requested type and make each hit absolute
    // The page URL is the base for relative links
    let links: Vec<String> = catalog
        .find_links(&body, file_types)
        .map(|raw| resolve_url(page_url, raw))
        .collect();

    debug!(url = %page_url, count = links.len(), "links extracted");

    // Hand back an owning iterator: the body can be dropped now
    links.into_iter()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does `.` not run past the end of a line?
//    - In the regex crate `.` matches anything except '\n' by default
//    - Combined with the greedy `.*`, each rule finds at most one link
//      per line of markup (the last one on that line)
//
// 2. What is r#"..."#?
//    - A raw string literal: backslashes and quotes inside are taken as-is
//    - Handy for regexes that contain '"'
//
// 3. Why `impl Iterator<Item = &'a str> + 'a`?
//    - The matches borrow from both the catalog and the page body
//    - The lifetime says the iterator can't outlive either of them
// -----------------------------------------------------------------------------
