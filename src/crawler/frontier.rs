//! Crawl frontier: FIFO queue of discovered pages plus the visited set
//! that guards it
//!
//! The frontier owns duplicate suppression. A URL is recorded as seen the
//! moment it is queued, so a page discovered again later in the crawl is
//! dropped instead of queued a second time.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL queued for fetching together with its link distance from the start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: Url,

    /// Link distance from the start URL (the start URL itself is depth 0)
    pub depth: u32,
}

/// FIFO frontier with built-in duplicate suppression
///
/// Entries are processed strictly in discovery order, which keeps the crawl
/// deterministic for a fixed site snapshot.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    seen: HashSet<Url>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a URL at the given depth unless it was queued before
    ///
    /// # Returns
    ///
    /// * `true` - The URL is new and was added to the queue
    /// * `false` - The URL was already seen during this crawl
    pub fn push_discovered(&mut self, url: Url, depth: u32) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }

        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Takes the oldest queued entry
    pub fn pop_front(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Returns the number of entries waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of distinct URLs ever queued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
