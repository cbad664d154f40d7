//! Lighthouse adapter
//!
//! Drives a Lighthouse runner service and converts its audit report into
//! unified issues. An audit is a finding when its score is below 1 or when
//! it has no score at all (not applicable / informational). Unscored audits
//! classify as notices; scored failures classify as errors when they belong
//! to the accessibility or SEO category and as warnings otherwise.

use super::{guard, ScannerAdapter, ToolId, ToolOutcome};
use crate::unify::{Severity, UnifiedIssue};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct LighthouseReport {
    #[serde(default)]
    audits: HashMap<String, LighthouseAudit>,
    #[serde(default)]
    categories: HashMap<String, LighthouseCategory>,
}

#[derive(Debug, Deserialize)]
struct LighthouseAudit {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LighthouseCategory {
    #[serde(rename = "auditRefs", default)]
    audit_refs: Vec<LighthouseAuditRef>,
}

#[derive(Debug, Deserialize)]
struct LighthouseAuditRef {
    id: String,
}

pub struct LighthouseAdapter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl LighthouseAdapter {
    pub fn new(client: Client, endpoint: String, timeout: Duration) -> Self {
        Self {
            client,
            endpoint,
            timeout,
        }
    }

    async fn scan(&self, url: &Url) -> Result<(Vec<UnifiedIssue>, serde_json::Value), String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "url": url.as_str(),
                "categories": ["performance", "accessibility", "seo", "best-practices"],
            }))
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
impl ScannerAdapter for LighthouseAdapter {
    fn tool(&self) -> ToolId {
        ToolId::Lighthouse
    }

    async fn run(&self, url: &Url) -> ToolOutcome {
        guard(self.tool(), self.timeout, self.scan(url)).await
    }
}

/// Parses a Lighthouse report into unified issues
fn parse_response(raw: &serde_json::Value) -> Result<Vec<UnifiedIssue>, String> {
    let report: LighthouseReport = serde_json::from_value(raw.clone())
        .map_err(|e| format!("unexpected payload shape: {}", e))?;

    // Audit id -> owning category, for severity classification
    let mut category_of: HashMap<&str, &str> = HashMap::new();
    for (name, category) in &report.categories {
        for audit_ref in &category.audit_refs {
            category_of.entry(audit_ref.id.as_str()).or_insert(name);
        }
    }

    // Audit maps are unordered; sort ids for a stable output
    let mut ids: Vec<&String> = report.audits.keys().collect();
    ids.sort();

    let mut issues = Vec::new();
    for id in ids {
        let audit = &report.audits[id];

        let severity = match audit.score {
            None => Severity::Notice,
            Some(score) if score < 1.0 => {
                match category_of.get(id.as_str()).copied() {
                    Some("accessibility") | Some("seo") => Severity::Error,
                    _ => Severity::Warning,
                }
            }
            // Passing audit, not a finding
            Some(_) => continue,
        };

        let message = if audit.title.is_empty() {
            audit.description.clone()
        } else {
            audit.title.clone()
        };

        issues.push(UnifiedIssue {
            code: if audit.id.is_empty() {
                id.clone()
            } else {
                audit.id.clone()
            },
            message,
            severity,
            source: ToolId::Lighthouse,
            occurrences: 1,
            selectors: Vec::new(),
            contexts: Vec::new(),
            impact: None,
            wcag_guideline: None,
        });
    }

    Ok(issues)
}
