//! HTML to Markdown conversion
//!
//! This module turns a fetched regulation page into clean Markdown:
//! - Chrome elements (scripts, navigation, headers, footers) are removed
//! - The content region is located with an ordered list of CSS selectors
//! - The region is converted to Markdown and blank-line runs are collapsed
//!
//! The selector chain reflects how municipal regulation sites are built:
//! the article body usually sits in `div.reiki_body`, with `main` and
//! `body` as progressively coarser fallbacks.

mod selection;

use crate::config::ConvertConfig;
use crate::ConfigError;
use scraper::{Html, Selector};
use selection::{select_content_region, strip_elements};

/// Converts HTML pages to Markdown using configured selector lists
///
/// The converter is built once per crawl; `convert` is a pure function of
/// its input, so the same page always yields the same Markdown.
pub struct MarkdownConverter {
    content_selectors: Vec<(String, Selector)>,
    strip_selectors: Vec<Selector>,
}

impl MarkdownConverter {
    /// Builds a converter, compiling the configured selectors
    ///
    /// # Arguments
    ///
    /// * `config` - The convert configuration
    ///
    /// # Returns
    ///
    /// * `Ok(MarkdownConverter)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector failed to parse
    pub fn new(config: &ConvertConfig) -> Result<Self, ConfigError> {
        let content_selectors = config
            .content_selectors
            .iter()
            .map(|s| Ok((s.clone(), compile_selector(s)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let strip_selectors = config
            .strip_selectors
            .iter()
            .map(|s| compile_selector(s))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            content_selectors,
            strip_selectors,
        })
    }

    /// Converts an HTML page to cleaned Markdown
    ///
    /// # Conversion Steps
    ///
    /// 1. Parse the HTML
    /// 2. Detach everything matching the strip selectors
    /// 3. Pick the content region with the first matching content selector;
    ///    if none matches, convert the whole remaining document
    /// 4. Convert to Markdown, collapse runs of blank lines, and trim
    ///
    /// # Arguments
    ///
    /// * `html` - The page HTML, already decoded to UTF-8
    ///
    /// # Returns
    ///
    /// The cleaned Markdown text
    pub fn convert(&self, html: &str) -> String {
        let mut document = Html::parse_document(html);

        strip_elements(&mut document, &self.strip_selectors);

        let region = match select_content_region(&document, &self.content_selectors) {
            Some((name, region)) => {
                tracing::debug!("Content selector '{}' matched", name);
                region
            }
            None => {
                tracing::warn!("No content selector matched; converting the whole page");
                document.root_element().html()
            }
        };

        let markdown = html2md::parse_html(&region);

        collapse_blank_lines(&markdown).trim().to_string()
    }
}

/// Compiles a CSS selector string
fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector(selector.to_string()))
}

/// Collapses runs of three or more newlines down to exactly two
///
/// The Markdown printer leaves large vertical gaps where tables and nested
/// elements were dropped. Two newlines (one blank line) is all Markdown
/// needs to separate blocks.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }

    out
}
