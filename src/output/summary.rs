//! End-of-crawl summary
//!
//! The summary is the operator-facing account of what a crawl run did. It
//! is printed to stdout after the crawl finishes, separate from the
//! structured log stream.

use chrono::{DateTime, Utc};

/// Counters and timing for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl finished
    pub finished_at: DateTime<Utc>,

    /// Pages fetched successfully at any depth
    pub pages_fetched: u64,

    /// Pages given up on after exhausting retries
    pub fetch_failures: u64,

    /// Documents written to the output directory
    pub documents_saved: u64,

    /// Terminal-depth pages rejected for falling under the content
    /// threshold
    pub rejected_short: u64,

    /// Where the documents were written
    pub output_dir: String,
}

impl CrawlSummary {
    /// Returns the wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Formats the crawl summary block
pub fn format_summary(summary: &CrawlSummary) -> String {
    let mut out = String::new();

    out.push_str("\n--- Crawl & Conversion Summary ---\n");
    out.push_str(&format!(
        "Total documents saved: {}\n",
        summary.documents_saved
    ));
    out.push_str(&format!("Pages fetched:         {}\n", summary.pages_fetched));
    out.push_str(&format!("Fetch failures:        {}\n", summary.fetch_failures));
    out.push_str(&format!("Skipped (short):       {}\n", summary.rejected_short));
    out.push_str(&format!("Output directory:      {}\n", summary.output_dir));
    out.push_str(&format!(
        "Elapsed:               {:.1}s\n",
        summary.duration_seconds()
    ));

    out
}

/// Prints the crawl summary block to stdout
pub fn print_summary(summary: &CrawlSummary) {
    print!("{}", format_summary(summary));
}
