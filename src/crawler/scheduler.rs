//! Scheduler for driving the crawl from start URL to summary
//!
//! This module owns the crawl loop:
//! - Seeding the frontier with the start URL
//! - Fetching pages in FIFO order, one at a time
//! - Queueing same-host links from pages above the depth limit
//! - Converting and persisting pages at the depth limit
//! - Stopping at the document budget or when the frontier runs dry

use crate::convert::MarkdownConverter;
use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::output::{ConvertedDocument, CrawlSummary, DocumentWriter, RawHtmlWriter};
use crate::Result;
use chrono::Utc;
use url::Url;

/// A fetched page on its way to conversion
#[derive(Debug, Clone)]
pub struct PageDocument {
    /// The URL the page was fetched from
    pub url: Url,

    /// Link distance from the start URL
    pub depth: u32,

    /// The page body, decoded to UTF-8
    pub html: String,
}

/// Single-threaded breadth-first crawl over one municipal site
///
/// The scheduler owns nothing but the loop: fetching, converting and
/// persisting are done by the collaborators handed to `new`, which keeps
/// each of them testable on its own.
///
/// Depth counts link hops from the start URL. Pages below the depth limit
/// are only mined for links; pages exactly at the limit are the regulation
/// documents and are converted and saved. Fetch failures are logged and
/// skipped, while persistence failures abort the crawl.
pub struct CrawlScheduler {
    fetcher: Fetcher,
    converter: MarkdownConverter,
    writer: DocumentWriter,
    raw_html_writer: Option<RawHtmlWriter>,
    min_content_chars: usize,
}

impl CrawlScheduler {
    /// Creates a scheduler from its collaborators
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetches pages with delay and retry handling
    /// * `converter` - Turns page HTML into Markdown
    /// * `writer` - Persists converted documents
    /// * `raw_html_writer` - Optional snapshot writer applied to every
    ///   fetched page
    /// * `min_content_chars` - Converted documents shorter than this many
    ///   characters are rejected as menu or boilerplate pages
    pub fn new(
        fetcher: Fetcher,
        converter: MarkdownConverter,
        writer: DocumentWriter,
        raw_html_writer: Option<RawHtmlWriter>,
        min_content_chars: usize,
    ) -> Self {
        Self {
            fetcher,
            converter,
            writer,
            raw_html_writer,
            min_content_chars,
        }
    }

    /// Runs the crawl to completion
    ///
    /// The crawl ends when `max_documents` documents have been saved or
    /// the frontier is exhausted, whichever comes first.
    ///
    /// # Arguments
    ///
    /// * `start_url` - The page the crawl starts from, at depth 0
    /// * `max_depth` - Pages at exactly this depth are converted and
    ///   saved; links are followed only from pages above it
    /// * `max_documents` - Upper bound on saved documents
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - Counters and timing for the finished crawl
    /// * `Err(HarvestError)` - A document could not be persisted
    pub async fn run(
        &self,
        start_url: Url,
        max_depth: u32,
        max_documents: usize,
    ) -> Result<CrawlSummary> {
        let started_at = Utc::now();
        tracing::info!("Starting crawl from: {}", start_url);

        let mut frontier = Frontier::new();
        frontier.push_discovered(start_url, 0);

        let mut pages_fetched: u64 = 0;
        let mut fetch_failures: u64 = 0;
        let mut documents_saved: u64 = 0;
        let mut rejected_short: u64 = 0;

        while documents_saved < max_documents as u64 {
            let Some(entry) = frontier.pop_front() else {
                break;
            };

            // Never fetch past the depth limit
            if entry.depth > max_depth {
                continue;
            }

            let html = match self.fetcher.fetch(&entry.url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Fetch failed: {}", e);
                    fetch_failures += 1;
                    continue;
                }
            };
            pages_fetched += 1;

            let page = PageDocument {
                url: entry.url,
                depth: entry.depth,
                html,
            };

            if let Some(raw_writer) = &self.raw_html_writer {
                raw_writer.write(&page.url, &page.html)?;
            }

            if page.depth < max_depth {
                let links = extract_links(&page.html, &page.url);
                tracing::debug!("Found {} links on {}", links.len(), page.url);

                for link in links {
                    frontier.push_discovered(link, page.depth + 1);
                }
                continue;
            }

            // Terminal depth: this is a regulation document
            let markdown = self.converter.convert(&page.html);

            if markdown.chars().count() < self.min_content_chars {
                tracing::info!("Skipping short content or menu: {}", page.url);
                rejected_short += 1;
                continue;
            }

            self.writer.write(&ConvertedDocument {
                source_url: page.url,
                markdown,
            })?;
            documents_saved += 1;
            tracing::info!(
                "Progress: {}/{} documents saved.",
                documents_saved,
                max_documents
            );
        }

        tracing::info!("Crawl completed. Total documents saved: {}", documents_saved);

        Ok(CrawlSummary {
            started_at,
            finished_at: Utc::now(),
            pages_fetched,
            fetch_failures,
            documents_saved,
            rejected_short,
            output_dir: self.writer.dir().display().to_string(),
        })
    }
}
