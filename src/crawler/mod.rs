//! Crawl orchestration
//!
//! A crawl is a breadth-first walk of same-origin links from a root URL,
//! bounded by a page budget, a frontier cap, and an optional wall-clock
//! budget. [`CrawlJob`] describes one request, [`Frontier`] holds the queue,
//! and [`Coordinator`] runs the loop.

mod coordinator;
mod frontier;
mod job;

pub use coordinator::{Coordinator, CrawlStatus};
pub use frontier::Frontier;
pub use job::{CrawlJob, DEFAULT_MAX_PAGES};
