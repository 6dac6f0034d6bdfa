//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing converted documents as Markdown files
//! - Optional raw HTML snapshots alongside the Markdown
//! - Deriving stable filenames from document URLs
//! - The end-of-crawl summary printed for the operator

mod filename;
mod markdown;
mod raw_html;
mod summary;

pub use filename::document_stem;
pub use markdown::{ConvertedDocument, DocumentWriter};
pub use raw_html::RawHtmlWriter;
pub use summary::{format_summary, print_summary, CrawlSummary};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
///
/// Unlike fetch errors these are fatal: a crawl that cannot persist its
/// results has no reason to keep requesting pages.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
