//! Scanner adapters for the external web-quality tools
//!
//! Each adapter wraps one external checker behind the same contract: give it
//! a URL, get back either a list of unified issues plus the tool's raw
//! payload, or a failure message. Adapters never panic and never let an
//! error escape their boundary: network failures, bad payload shapes, and
//! timeouts all collapse into [`ToolOutcome::Failed`], which the orchestrator
//! records without disturbing sibling tools.
//!
//! Every adapter owns exactly one fixed parser for its tool's native schema
//! and fails closed on anything unexpected.

mod ibm;
mod lighthouse;
mod pa11y;
mod seo;
mod wave;

pub use ibm::IbmA11yAdapter;
pub use lighthouse::LighthouseAdapter;
pub use pa11y::Pa11yAdapter;
pub use seo::SeoAdapter;
pub use wave::WaveAdapter;

use crate::config::Config;
use crate::crawler::CrawlJob;
use crate::unify::UnifiedIssue;
use reqwest::Client;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Identifier of one scanner tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolId {
    #[serde(rename = "pa11y")]
    Pa11y,
    #[serde(rename = "wave")]
    Wave,
    #[serde(rename = "seo")]
    Seo,
    #[serde(rename = "lighthouse")]
    Lighthouse,
    #[serde(rename = "ibm-a11y")]
    IbmA11y,
}

impl ToolId {
    /// Every known tool, in the order adapters are launched
    pub const ALL: [ToolId; 5] = [
        ToolId::Pa11y,
        ToolId::Wave,
        ToolId::Seo,
        ToolId::Lighthouse,
        ToolId::IbmA11y,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::Pa11y => "pa11y",
            ToolId::Wave => "wave",
            ToolId::Seo => "seo",
            ToolId::Lighthouse => "lighthouse",
            ToolId::IbmA11y => "ibm-a11y",
        }
    }

    /// Display name used in crawl error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolId::Pa11y => "Pa11y",
            ToolId::Wave => "WAVE",
            ToolId::Seo => "SEO",
            ToolId::Lighthouse => "Lighthouse",
            ToolId::IbmA11y => "IBM A11y",
        }
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pa11y" => Ok(ToolId::Pa11y),
            "wave" => Ok(ToolId::Wave),
            "seo" => Ok(ToolId::Seo),
            "lighthouse" => Ok(ToolId::Lighthouse),
            "ibm-a11y" | "ibm" => Ok(ToolId::IbmA11y),
            other => Err(format!("unknown tool identifier: '{}'", other)),
        }
    }
}

/// Result of running one scanner against one URL
#[derive(Debug, Clone)]
pub enum ToolOutcome {
    /// The tool completed; `raw` preserves its native payload
    Ok {
        issues: Vec<UnifiedIssue>,
        raw: serde_json::Value,
    },

    /// The tool failed, timed out, or was missing a credential
    Failed { error: String },
}

impl ToolOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ToolOutcome::Ok { .. })
    }

    /// Unified issues, empty for failed outcomes
    pub fn issues(&self) -> &[UnifiedIssue] {
        match self {
            ToolOutcome::Ok { issues, .. } => issues,
            ToolOutcome::Failed { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ToolOutcome::Ok { .. } => None,
            ToolOutcome::Failed { error } => Some(error),
        }
    }
}

// Serialized as {"success": true, "issues": [...]} or
// {"success": false, "error": "..."}. The raw payload is kept in memory for
// downstream consumers but not echoed into the response.
impl Serialize for ToolOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ToolOutcome::Ok { issues, .. } => {
                let mut state = serializer.serialize_struct("ToolOutcome", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("issues", issues)?;
                state.end()
            }
            ToolOutcome::Failed { error } => {
                let mut state = serializer.serialize_struct("ToolOutcome", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}

/// The capability each scanner exposes to the orchestrator
///
/// Implementations must be cheap to clone behind an `Arc` and safe to call
/// from a spawned task; the orchestrator fans all enabled adapters out
/// concurrently per page and joins them wait-for-all.
#[async_trait::async_trait]
pub trait ScannerAdapter: Send + Sync {
    /// Which tool this adapter drives
    fn tool(&self) -> ToolId;

    /// Runs the tool against one URL
    ///
    /// Must settle within the adapter's own timeout and never panic.
    async fn run(&self, url: &Url) -> ToolOutcome;
}

/// Builds the adapter set for a job's enabled tools
///
/// Order follows [`ToolId::ALL`] so runs are deterministic regardless of the
/// order tools were requested in.
pub fn build_adapters(
    client: &Client,
    config: &Config,
    job: &CrawlJob,
) -> Vec<Arc<dyn ScannerAdapter>> {
    let mut adapters: Vec<Arc<dyn ScannerAdapter>> = Vec::new();

    for tool in ToolId::ALL {
        if !job.enabled_tools.contains(&tool) {
            continue;
        }

        let endpoint = config.scanners.endpoint(tool).to_string();
        let timeout = config.scanners.timeout(tool);

        let adapter: Arc<dyn ScannerAdapter> = match tool {
            ToolId::Pa11y => Arc::new(Pa11yAdapter::new(client.clone(), endpoint, timeout)),
            ToolId::Wave => Arc::new(WaveAdapter::new(
                client.clone(),
                endpoint,
                timeout,
                job.wave_api_key.clone(),
            )),
            ToolId::Seo => Arc::new(SeoAdapter::new(client.clone(), endpoint, timeout)),
            ToolId::Lighthouse => {
                Arc::new(LighthouseAdapter::new(client.clone(), endpoint, timeout))
            }
            ToolId::IbmA11y => Arc::new(IbmA11yAdapter::new(client.clone(), endpoint, timeout)),
        };

        adapters.push(adapter);
    }

    adapters
}

/// Runs an adapter body under its timeout, converting every exit into an outcome
pub(crate) async fn guard<F>(tool: ToolId, timeout: Duration, body: F) -> ToolOutcome
where
    F: Future<Output = Result<(Vec<UnifiedIssue>, serde_json::Value), String>>,
{
    match tokio::time::timeout(timeout, body).await {
        Ok(Ok((issues, raw))) => ToolOutcome::Ok { issues, raw },
        Ok(Err(error)) => ToolOutcome::Failed { error },
        Err(_) => ToolOutcome::Failed {
            error: format!("{} timed out after {}s", tool.display_name(), timeout.as_secs()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_id_round_trip() {
        for tool in ToolId::ALL {
            let parsed: ToolId = tool.as_str().parse().unwrap();
            assert_eq!(parsed, tool);
        }
    }

    #[test]
    fn test_tool_id_unknown() {
        assert!("axe-core".parse::<ToolId>().is_err());
    }

    #[test]
    fn test_tool_id_serde_names() {
        assert_eq!(serde_json::to_string(&ToolId::IbmA11y).unwrap(), "\"ibm-a11y\"");
        let parsed: ToolId = serde_json::from_str("\"pa11y\"").unwrap();
        assert_eq!(parsed, ToolId::Pa11y);
    }

    #[test]
    fn test_outcome_serialization() {
        let ok = ToolOutcome::Ok {
            issues: vec![],
            raw: serde_json::json!({"secret": true}),
        };
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("raw").is_none());

        let failed = ToolOutcome::Failed {
            error: "boom".to_string(),
        };
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "boom");
    }

    #[tokio::test]
    async fn test_guard_times_out() {
        let outcome = guard(ToolId::Pa11y, Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok((vec![], serde_json::Value::Null))
        })
        .await;

        assert!(!outcome.is_ok());
        assert!(outcome.error().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_guard_passes_failure_through() {
        let outcome = guard(ToolId::Wave, Duration::from_secs(1), async {
            Err("credential missing".to_string())
        })
        .await;
        assert_eq!(outcome.error(), Some("credential missing"));
    }
}
