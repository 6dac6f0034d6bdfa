//! URL handling module for Reiki Harvest
//!
//! This module provides URL normalization and the same-host check that keeps
//! the crawl inside the municipal site it started on.

mod normalize;

use url::Url;

// Re-export main functions
pub use normalize::normalize_url;

/// Returns true if both URLs point at exactly the same host
///
/// Hosts must match exactly. `www.town.example.lg.jp` and
/// `town.example.lg.jp` are different hosts, and subdomains of the start
/// host are out of scope for the crawl.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use reiki_harvest::url::same_host;
///
/// let a = Url::parse("https://www.town.example.lg.jp/reiki/menu.html").unwrap();
/// let b = Url::parse("https://www.town.example.lg.jp/somewhere/else.html").unwrap();
/// assert!(same_host(&a, &b));
/// ```
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(host_a), Some(host_b)) => host_a == host_b,
        _ => false,
    }
}
