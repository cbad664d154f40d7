//! FIFO crawl frontier with dedup and a size cap

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Breadth-first queue of URLs still to scan
///
/// A URL enters the frontier at most once for the lifetime of the crawl:
/// the `enqueued` set remembers everything ever pushed, so a page cannot be
/// rediscovered after it was popped. The cap bounds only the pending queue,
/// not the memory of what has been seen.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<Url>,
    enqueued: HashSet<String>,
    visited: HashSet<String>,
    max_size: usize,
}

impl Frontier {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            enqueued: HashSet::new(),
            visited: HashSet::new(),
            max_size,
        }
    }

    /// Enqueues a URL; returns false when it is a duplicate or the cap is hit
    pub fn push(&mut self, url: Url) -> bool {
        if self.queue.len() >= self.max_size {
            return false;
        }
        if !self.enqueued.insert(url.as_str().to_string()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    pub fn pop(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    /// Marks a URL visited; returns false when it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://ex.test{}", path)).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(10);
        assert!(frontier.push(url("/a")));
        assert!(frontier.push(url("/b")));
        assert!(frontier.push(url("/c")));

        assert_eq!(frontier.pop().unwrap().path(), "/a");
        assert_eq!(frontier.pop().unwrap().path(), "/b");
        assert_eq!(frontier.pop().unwrap().path(), "/c");
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut frontier = Frontier::new(10);
        assert!(frontier.push(url("/a")));
        assert!(!frontier.push(url("/a")));
        assert_eq!(frontier.pending(), 1);
    }

    #[test]
    fn test_popped_url_cannot_reenter() {
        let mut frontier = Frontier::new(10);
        frontier.push(url("/a"));
        frontier.pop();
        assert!(!frontier.push(url("/a")));
    }

    #[test]
    fn test_cap_enforced() {
        let mut frontier = Frontier::new(2);
        assert!(frontier.push(url("/a")));
        assert!(frontier.push(url("/b")));
        assert!(!frontier.push(url("/c")));
        assert_eq!(frontier.pending(), 2);

        // Popping frees a slot for new discoveries
        frontier.pop();
        assert!(frontier.push(url("/d")));
    }

    #[test]
    fn test_mark_visited_once() {
        let mut frontier = Frontier::new(10);
        assert!(frontier.mark_visited(&url("/a")));
        assert!(!frontier.mark_visited(&url("/a")));
    }
}
