//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with politeness delay and retry logic
//! - Link extraction from fetched pages
//! - The FIFO frontier with duplicate suppression
//! - The depth-bounded crawl loop itself

mod extractor;
mod fetcher;
mod frontier;
mod scheduler;

pub use extractor::extract_links;
pub use fetcher::{FetchError, Fetcher};
pub use frontier::{Frontier, FrontierEntry};
pub use scheduler::{CrawlScheduler, PageDocument};

use crate::config::Config;
use crate::convert::MarkdownConverter;
use crate::output::{CrawlSummary, DocumentWriter, RawHtmlWriter};
use crate::url::normalize_url;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Normalize the start URL
/// 2. Build the fetcher, converter and writers from the configuration
/// 3. Drive the scheduler until the document budget is reached or the
///    frontier is exhausted
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Counters and timing for the finished crawl
/// * `Err(HarvestError)` - Setup failed or a document could not be written
pub async fn crawl(config: Config) -> Result<CrawlSummary> {
    let start_url = normalize_url(&config.crawler.start_url)?;

    let fetcher = Fetcher::new(&config.fetch)?;
    let converter = MarkdownConverter::new(&config.convert)?;
    let writer = DocumentWriter::new(&config.output.markdown_dir)?;

    let raw_html_writer = match &config.output.raw_html_dir {
        Some(dir) => Some(RawHtmlWriter::new(dir)?),
        None => None,
    };

    let scheduler = CrawlScheduler::new(
        fetcher,
        converter,
        writer,
        raw_html_writer,
        config.crawler.min_content_chars,
    );

    scheduler
        .run(
            start_url,
            config.crawler.max_depth,
            config.crawler.max_documents,
        )
        .await
}
