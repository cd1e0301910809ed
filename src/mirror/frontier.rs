// src/mirror/frontier.rs
// =============================================================================
// The crawl frontier: URLs discovered but not yet fetched.
//
// How it works:
// 1. push() adds a URL to the back of a FIFO queue
// 2. Adding a URL that is already queued or already visited does nothing
// 3. pop() takes the oldest URL off the front
// 4. mark_visited() records that a URL has been handed to a worker; it is
//    never fetched again, even if some other page references it later
//
// Identity is the absolute URL without its fragment, so "a.css#x" and
// "a.css" are the same asset.
//
// Rust concepts:
// - VecDeque: FIFO queue for breadth-first order
// - HashSet: O(1) membership checks for pending and visited URLs
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    pending: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Url) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed);
        frontier
    }

    /// Queues `url` unless it is already pending or visited
    ///
    /// Returns true if the URL was newly added.
    pub fn push(&mut self, mut url: Url) -> bool {
        url.set_fragment(None);
        let key = url.as_str().to_string();

        if self.visited.contains(&key) || self.pending.contains(&key) {
            return false;
        }

        self.pending.insert(key);
        self.queue.push_back(url);
        true
    }

    pub fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.pending.remove(url.as_str());
        Some(url)
    }

    /// Records `url` as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
