//! Crawl orchestration: the breadth-first scan loop
//!
//! The coordinator owns the whole run: it validates the job, builds the
//! adapter set, then walks the frontier page by page. Pages are scanned
//! sequentially; within a page, every enabled scanner runs concurrently and
//! the loop waits for all of them before moving on. Tool failures are
//! recorded and never abort the crawl.

use crate::config::Config;
use crate::crawler::{CrawlJob, Frontier};
use crate::links::extract_links;
use crate::render::{build_http_client, Renderer};
use crate::report::{CrawlResponse, PageResult, RunSummary};
use crate::scanners::{build_adapters, ScannerAdapter, ToolId, ToolOutcome};
use crate::SweepError;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// How a crawl ended
///
/// A crawl that hits its wall-clock budget still returns everything scanned
/// so far; only request validation and client setup can abort a run outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    /// Page budget reached or frontier exhausted
    Completed,
    /// Wall-clock budget expired with pages still pending
    TimedOut,
}

/// Runs crawl jobs against a fixed configuration
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    renderer: Renderer,
}

impl Coordinator {
    pub fn new(config: Config) -> Result<Self, SweepError> {
        let client = build_http_client(&config.user_agent.user_agent())?;
        let renderer = Renderer::new(client.clone(), config.render.timeout());

        Ok(Self {
            config: Arc::new(config),
            client,
            renderer,
        })
    }

    /// Executes one crawl job to completion
    pub async fn run(&self, job: &CrawlJob) -> Result<(CrawlResponse, CrawlStatus), SweepError> {
        job.validate()?;
        let root = job.root_url()?;
        let base_host = job.base_host()?;

        let adapters = build_adapters(&self.client, &self.config, job);
        tracing::info!(
            "Starting crawl of {} (max {} pages, {} tools)",
            root,
            job.max_pages,
            adapters.len()
        );

        let mut frontier = Frontier::new(job.frontier_cap());
        frontier.push(root);

        let mut summary = RunSummary::default();
        let mut pages = Vec::new();
        let mut errors: Vec<String> = Vec::new();
        let mut status = CrawlStatus::Completed;

        let started = Instant::now();
        let deadline = job.max_duration().map(|budget| started + budget);

        while summary.pages_scanned < job.max_pages {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    tracing::warn!(
                        "Crawl hit its time budget after {} pages, returning partial results",
                        summary.pages_scanned
                    );
                    status = CrawlStatus::TimedOut;
                    break;
                }
            }

            let url = match frontier.pop() {
                Some(url) => url,
                None => break,
            };

            // Re-discovered pages are skipped without consuming budget
            if !frontier.mark_visited(&url) {
                continue;
            }

            tracing::info!(
                "Scanning page {}/{}: {}",
                summary.pages_scanned + 1,
                job.max_pages,
                url
            );

            let outcomes = scan_page(&adapters, &url).await;
            for (tool, outcome) in &outcomes {
                if let Some(error) = outcome.error() {
                    errors.push(format!("{} Error ({}): {}", tool.display_name(), url, error));
                }
            }

            let page = PageResult::new(url.to_string(), outcomes);
            summary.record_page(&page);
            pages.push(page);

            // Discover links only while budget remains for them to matter
            if summary.pages_scanned < job.max_pages {
                self.discover_links(&url, &base_host, &mut frontier, &mut errors)
                    .await;
            }
        }

        tracing::info!(
            "Crawl finished in {:.1}s: {} pages, {} errors, {} warnings, {} notices",
            started.elapsed().as_secs_f64(),
            summary.pages_scanned,
            summary.total_errors,
            summary.total_warnings,
            summary.total_notices
        );

        Ok((CrawlResponse::new(summary, pages, errors), status))
    }

    /// Renders a page and feeds its same-origin links into the frontier
    ///
    /// Discovery failures never abort the crawl: the page keeps its scan
    /// results and contributes no links, but the failure is recorded as a
    /// crawl error.
    async fn discover_links(
        &self,
        url: &Url,
        base_host: &str,
        frontier: &mut Frontier,
        errors: &mut Vec<String>,
    ) {
        match self.renderer.render(url).await {
            Ok(rendered) => {
                let links = extract_links(&rendered.html, &rendered.final_url, base_host);
                let mut added = 0;
                for link in links {
                    if frontier.push(link) {
                        added += 1;
                    }
                }
                tracing::debug!("Discovered {} new links on {}", added, url);
            }
            Err(e) => {
                tracing::warn!("Link discovery failed for {}: {}", url, e);
                errors.push(format!("Link Extraction Error ({}): {}", url, e));
            }
        }
    }
}

/// Fans all adapters out for one page and waits for every one to settle
///
/// Each adapter runs on its own task; a panicked task is folded into a
/// failed outcome so one broken scanner never takes the page down.
async fn scan_page(
    adapters: &[Arc<dyn ScannerAdapter>],
    url: &Url,
) -> Vec<(ToolId, ToolOutcome)> {
    let mut handles = Vec::with_capacity(adapters.len());
    for adapter in adapters {
        let adapter = Arc::clone(adapter);
        let url = url.clone();
        let tool = adapter.tool();
        handles.push((
            tool,
            tokio::spawn(async move { adapter.run(&url).await }),
        ));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (tool, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => ToolOutcome::Failed {
                error: format!("scanner task failed: {}", e),
            },
        };
        outcomes.push((tool, outcome));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticAdapter {
        tool: ToolId,
        outcome: ToolOutcome,
    }

    #[async_trait::async_trait]
    impl ScannerAdapter for StaticAdapter {
        fn tool(&self) -> ToolId {
            self.tool
        }

        async fn run(&self, _url: &Url) -> ToolOutcome {
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_scan_page_collects_all_outcomes() {
        let adapters: Vec<Arc<dyn ScannerAdapter>> = vec![
            Arc::new(StaticAdapter {
                tool: ToolId::Pa11y,
                outcome: ToolOutcome::Ok {
                    issues: vec![],
                    raw: serde_json::Value::Null,
                },
            }),
            Arc::new(StaticAdapter {
                tool: ToolId::Wave,
                outcome: ToolOutcome::Failed {
                    error: "WAVE API key is required".to_string(),
                },
            }),
        ];

        let url = Url::parse("https://ex.test/").unwrap();
        let outcomes = scan_page(&adapters, &url).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, ToolId::Pa11y);
        assert!(outcomes[0].1.is_ok());
        assert_eq!(outcomes[1].0, ToolId::Wave);
        assert_eq!(outcomes[1].1.error(), Some("WAVE API key is required"));
    }

    #[tokio::test]
    async fn test_invalid_job_aborts_run() {
        let coordinator = Coordinator::new(Config::default()).unwrap();
        let mut job = CrawlJob::new("https://ex.test/");
        job.max_pages = 0;

        let err = coordinator.run(&job).await.unwrap_err();
        assert!(matches!(err, SweepError::InvalidRequest(_)));
    }
}
