//! Link extraction from fetched pages
//!
//! This module parses HTML and collects the same-host links the crawl can
//! follow. Links come back in document order with duplicates removed, so a
//! fixed site snapshot always produces the same frontier.

use crate::url::same_host;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the followable links from a page
///
/// # Link Rules
///
/// **Include:**
/// - `<a href="...">` anchors, resolved against the page URL
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links (same page anchors)
/// - Empty or whitespace-only hrefs
/// - Anything that resolves to a non-HTTP(S) URL
/// - Anything on a different host than the page, subdomains included
///
/// Fragments are stripped from kept links, so `page.html#a` and
/// `page.html#b` collapse to a single candidate.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the page was fetched from, used for resolving
///   relative links and for the same-host check
///
/// # Returns
///
/// Absolute same-host URLs in document order, first occurrence kept
///
/// # Example
///
/// ```
/// use reiki_harvest::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="reiki/honbun.html">Regulation</a></body></html>"#;
/// let page_url = Url::parse("https://www.town.example.lg.jp/menu.html").unwrap();
/// let links = extract_links(html, &page_url);
/// assert_eq!(links[0].as_str(), "https://www.town.example.lg.jp/reiki/honbun.html");
/// ```
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_link(href, page_url) {
                    if same_host(&url, page_url) && seen.insert(url.clone()) {
                        links.push(url);
                    }
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match page_url.join(href) {
        Ok(mut absolute_url) => {
            // Only accept HTTP and HTTPS URLs
            if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
                return None;
            }

            absolute_url.set_fragment(None);
            Some(absolute_url)
        }
        Err(_) => None,
    }
}
