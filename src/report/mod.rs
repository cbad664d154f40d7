//! Per-page results and run-level aggregation
//!
//! A [`PageResult`] is built immutably once every scanner for a page has
//! settled; the [`RunSummary`] folds page results in as the crawl advances,
//! owned by the single coordinator task. Nothing here is mutated after the
//! run ends.

mod markdown;
mod views;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use views::{sorted_issues, wcag_distribution, SortedIssues, WcagDistribution};

use crate::scanners::{ToolId, ToolOutcome};
use crate::unify::{Severity, UnifiedIssue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One page's aggregated scan outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// The page that was scanned
    pub url: String,

    /// Outcome per tool, keyed by tool identifier
    pub tool_results: BTreeMap<String, ToolOutcome>,

    /// Unified issues classified as errors across all tools
    pub error_count: u32,

    /// Unified issues classified as warnings across all tools
    pub warning_count: u32,

    /// Unified issues classified as notices across all tools
    pub notice_count: u32,

    /// When the page's scans settled
    pub timestamp: DateTime<Utc>,
}

impl PageResult {
    /// Builds a page result from the settled tool outcomes
    ///
    /// Severity counts are derived here, once, by summing classified issues
    /// across tools; every unified issue has exactly one severity, so the
    /// three counts always sum to the page's total issue count.
    pub fn new(url: String, outcomes: Vec<(ToolId, ToolOutcome)>) -> Self {
        let mut error_count = 0;
        let mut warning_count = 0;
        let mut notice_count = 0;
        let mut tool_results = BTreeMap::new();

        for (tool, outcome) in outcomes {
            for issue in outcome.issues() {
                match issue.severity {
                    Severity::Error => error_count += 1,
                    Severity::Warning => warning_count += 1,
                    Severity::Notice => notice_count += 1,
                }
            }
            tool_results.insert(tool.as_str().to_string(), outcome);
        }

        Self {
            url,
            tool_results,
            error_count,
            warning_count,
            notice_count,
            timestamp: Utc::now(),
        }
    }

    /// All unified issues on this page, across tools
    ///
    /// No ordering guarantee exists between different tools' issues.
    pub fn issues(&self) -> impl Iterator<Item = &UnifiedIssue> {
        self.tool_results.values().flat_map(|o| o.issues().iter())
    }

    /// Total unified issues on this page
    pub fn issue_count(&self) -> u32 {
        self.error_count + self.warning_count + self.notice_count
    }
}

/// Crawl-level rollup, built incrementally as pages complete
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub pages_scanned: u32,
    pub total_errors: u32,
    pub total_warnings: u32,
    pub total_notices: u32,
    pub scanned_urls: Vec<String>,
}

impl RunSummary {
    /// Folds one completed page into the rollup
    pub fn record_page(&mut self, page: &PageResult) {
        self.pages_scanned += 1;
        self.total_errors += page.error_count;
        self.total_warnings += page.warning_count;
        self.total_notices += page.notice_count;
        self.scanned_urls.push(page.url.clone());
    }
}

/// The response returned to the crawl caller
///
/// `success` reflects only whether recoverable errors were recorded. A
/// crawl that skipped pages is still "successful" as long as each skip was
/// itself recorded as a crawl error entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResponse {
    pub success: bool,
    pub summary: RunSummary,
    pub pages: Vec<PageResult>,
    pub errors: Vec<String>,
}

impl CrawlResponse {
    pub fn new(summary: RunSummary, pages: Vec<PageResult>, errors: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            summary,
            pages,
            errors,
        }
    }
}
