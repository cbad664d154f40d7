//! Crawl job parameters

use crate::links::resolve_base_host;
use crate::scanners::ToolId;
use crate::SweepError;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Pages scanned per crawl when the caller does not say otherwise
pub const DEFAULT_MAX_PAGES: u32 = 5;

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_tools() -> Vec<ToolId> {
    ToolId::ALL.to_vec()
}

/// One crawl request: where to start, how far to go, which tools to run
///
/// Deserializes from the caller-facing camelCase request shape. Every field
/// except the root URL has a default, so `{"url": "example.com"}` is a
/// complete request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlJob {
    /// Root URL the crawl starts from; a bare hostname is accepted
    pub url: String,

    /// Hard page budget for the whole crawl
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Wall-clock budget; the crawl returns partial results when it expires
    #[serde(default)]
    pub max_duration_secs: Option<u64>,

    /// Frontier cap; defaults to twice the page budget
    #[serde(default)]
    pub max_frontier_size: Option<usize>,

    /// Which scanners to run on each page
    #[serde(rename = "tools", default = "default_tools")]
    pub enabled_tools: Vec<ToolId>,

    /// Credential for the WAVE API, when that tool is enabled
    #[serde(default)]
    pub wave_api_key: Option<String>,
}

impl CrawlJob {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_pages: DEFAULT_MAX_PAGES,
            max_duration_secs: None,
            max_frontier_size: None,
            enabled_tools: ToolId::ALL.to_vec(),
            wave_api_key: None,
        }
    }

    /// Checks the request is self-consistent before any network work
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.url.trim().is_empty() {
            return Err(SweepError::InvalidRequest("root URL is empty".to_string()));
        }
        if resolve_base_host(&self.url).is_none() {
            return Err(SweepError::InvalidRequest(format!(
                "cannot resolve a host from root URL '{}'",
                self.url
            )));
        }
        if self.max_pages == 0 {
            return Err(SweepError::InvalidRequest(
                "maxPages must be at least 1".to_string(),
            ));
        }
        if self.max_frontier_size == Some(0) {
            return Err(SweepError::InvalidRequest(
                "maxFrontierSize must be at least 1".to_string(),
            ));
        }
        if let Some(secs) = self.max_duration_secs {
            if secs == 0 {
                return Err(SweepError::InvalidRequest(
                    "maxDurationSecs must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The parsed root URL, with `https://` assumed for bare hostnames
    pub fn root_url(&self) -> Result<Url, SweepError> {
        let trimmed = self.url.trim();
        let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        Url::parse(&candidate)
            .map_err(|e| SweepError::InvalidRequest(format!("invalid root URL '{}': {}", self.url, e)))
    }

    /// The hostname all crawled links must match
    pub fn base_host(&self) -> Result<String, SweepError> {
        resolve_base_host(&self.url).ok_or_else(|| {
            SweepError::InvalidRequest(format!(
                "cannot resolve a host from root URL '{}'",
                self.url
            ))
        })
    }

    /// Frontier cap, defaulting to twice the page budget
    ///
    /// Enough slack that skipped and duplicate links do not starve the
    /// crawl, while keeping discovery memory bounded.
    pub fn frontier_cap(&self) -> usize {
        self.max_frontier_size
            .unwrap_or(self.max_pages as usize * 2)
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_deserializes_with_defaults() {
        let job: CrawlJob = serde_json::from_str(r#"{"url": "example.com"}"#).unwrap();
        assert_eq!(job.max_pages, 5);
        assert_eq!(job.enabled_tools, ToolId::ALL.to_vec());
        assert!(job.wave_api_key.is_none());
        assert!(job.max_duration_secs.is_none());
        job.validate().unwrap();
    }

    #[test]
    fn test_full_request_deserializes() {
        let job: CrawlJob = serde_json::from_str(
            r#"{
                "url": "https://example.com/start",
                "maxPages": 10,
                "maxDurationSecs": 120,
                "tools": ["pa11y", "wave"],
                "waveApiKey": "abc123"
            }"#,
        )
        .unwrap();

        assert_eq!(job.max_pages, 10);
        assert_eq!(job.max_duration(), Some(Duration::from_secs(120)));
        assert_eq!(job.enabled_tools, vec![ToolId::Pa11y, ToolId::Wave]);
        assert_eq!(job.wave_api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_bare_hostname_gets_https() {
        let job = CrawlJob::new("example.com");
        assert_eq!(job.root_url().unwrap().as_str(), "https://example.com/");
        assert_eq!(job.base_host().unwrap(), "example.com");
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(CrawlJob::new("").validate().is_err());
        assert!(CrawlJob::new("   ").validate().is_err());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut job = CrawlJob::new("example.com");
        job.max_pages = 0;
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_empty_tool_list_allowed() {
        // A crawl with no tools is legal, it just finds nothing
        let mut job = CrawlJob::new("example.com");
        job.enabled_tools.clear();
        job.validate().unwrap();
    }

    #[test]
    fn test_frontier_cap_defaults_to_twice_page_budget() {
        let mut job = CrawlJob::new("example.com");
        job.max_pages = 7;
        assert_eq!(job.frontier_cap(), 14);

        job.max_frontier_size = Some(3);
        assert_eq!(job.frontier_cap(), 3);
    }
}
