//! WAVE adapter
//!
//! Calls the WebAIM WAVE API (reporttype 2). WAVE groups findings by rule
//! itself, one item per rule code with its own instance count, spread over
//! six categories. Category membership decides both severity and impact;
//! contrast findings are deliberately folded into errors because contrast
//! failures are treated as blocking.
//!
//! WAVE is credential-gated: a missing API key short-circuits to a failed
//! outcome without touching the network.

use super::{guard, ScannerAdapter, ToolId, ToolOutcome};
use crate::unify::{Impact, Severity, UnifiedIssue};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Category names in the order issues are emitted
const CATEGORIES: &[(&str, Severity, Impact)] = &[
    ("error", Severity::Error, Impact::Critical),
    ("contrast", Severity::Error, Impact::Serious),
    ("alert", Severity::Warning, Impact::Moderate),
    ("feature", Severity::Notice, Impact::Minor),
    ("structure", Severity::Notice, Impact::Minor),
    ("aria", Severity::Notice, Impact::Moderate),
];

#[derive(Debug, Deserialize)]
struct WaveResponse {
    status: WaveStatus,
    #[serde(default)]
    categories: HashMap<String, WaveCategory>,
}

#[derive(Debug, Deserialize)]
struct WaveStatus {
    success: bool,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WaveCategory {
    #[serde(default)]
    items: HashMap<String, WaveItem>,
}

#[derive(Debug, Deserialize)]
struct WaveItem {
    #[serde(default)]
    description: String,
    count: Option<u32>,
    wcag: Option<String>,
    #[serde(default)]
    selectors: Vec<String>,
    #[serde(default)]
    context: Vec<String>,
}

pub struct WaveAdapter {
    client: Client,
    endpoint: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl WaveAdapter {
    pub fn new(
        client: Client,
        endpoint: String,
        timeout: Duration,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint,
            timeout,
            api_key,
        }
    }

    async fn scan(
        &self,
        url: &Url,
        key: &str,
    ) -> Result<(Vec<UnifiedIssue>, serde_json::Value), String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", key), ("url", url.as_str()), ("reporttype", "2")])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("service returned HTTP {}", response.status().as_u16()));
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("invalid JSON response: {}", e))?;

        let issues = parse_response(&raw)?;
        Ok((issues, raw))
    }
}

#[async_trait::async_trait]
impl ScannerAdapter for WaveAdapter {
    fn tool(&self) -> ToolId {
        ToolId::Wave
    }

    async fn run(&self, url: &Url) -> ToolOutcome {
        // Credential check happens before any network call
        let key = match self.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => key.to_string(),
            None => {
                return ToolOutcome::Failed {
                    error: "WAVE API key is required".to_string(),
                }
            }
        };

        guard(self.tool(), self.timeout, self.scan(url, &key)).await
    }
}

/// Parses a WAVE reporttype-2 payload into unified issues
fn parse_response(raw: &serde_json::Value) -> Result<Vec<UnifiedIssue>, String> {
    let response: WaveResponse = serde_json::from_value(raw.clone())
        .map_err(|e| format!("unexpected payload shape: {}", e))?;

    if !response.status.success {
        return Err(response
            .status
            .description
            .unwrap_or_else(|| "WAVE scan failed".to_string()));
    }

    let mut issues = Vec::new();

    for (category, severity, impact) in CATEGORIES {
        let items = match response.categories.get(*category) {
            Some(cat) => &cat.items,
            None => continue,
        };

        // WAVE item maps are unordered; sort codes for a stable output
        let mut codes: Vec<&String> = items.keys().collect();
        codes.sort();

        for code in codes {
            let item = &items[code];
            issues.push(UnifiedIssue {
                code: code.clone(),
                message: item.description.clone(),
                severity: *severity,
                source: ToolId::Wave,
                occurrences: item.count.unwrap_or(1).max(1),
                selectors: item.selectors.clone(),
                contexts: item.context.clone(),
                impact: Some(*impact),
                wcag_guideline: item.wcag.clone(),
            });
        }
    }

    Ok(issues)
}
