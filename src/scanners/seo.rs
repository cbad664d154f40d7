//! SEO analyzer adapter
//!
//! Drives the SEO analyzer service. Its issues carry no rule identifier, so
//! the message text doubles as the grouping code; the flagged element (when
//! present) becomes the issue context.

use super::{guard, ScannerAdapter, ToolId, ToolOutcome};
use crate::unify::{group_instances, InstanceFinding, Severity, UnifiedIssue};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct SeoAnalysis {
    #[serde(default)]
    issues: Vec<SeoIssue>,
}

#[derive(Debug, Deserialize)]
struct SeoIssue {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
    element: Option<String>,
}

pub struct SeoAdapter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl SeoAdapter {
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
            .json(&serde_json::json!({ "url": url.as_str() }))
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
impl ScannerAdapter for SeoAdapter {
    fn tool(&self) -> ToolId {
        ToolId::Seo
    }

    async fn run(&self, url: &Url) -> ToolOutcome {
        guard(self.tool(), self.timeout, self.scan(url)).await
    }
}

/// Parses an SEO analysis into grouped unified issues
fn parse_response(raw: &serde_json::Value) -> Result<Vec<UnifiedIssue>, String> {
    let analysis: SeoAnalysis = serde_json::from_value(raw.clone())
        .map_err(|e| format!("unexpected payload shape: {}", e))?;

    let findings: Vec<InstanceFinding> = analysis
        .issues
        .into_iter()
        .map(|issue| InstanceFinding {
            code: issue.message.clone(),
            message: issue.message,
            severity: parse_kind(&issue.kind),
            selector: None,
            context: issue.element,
            impact: None,
            wcag_guideline: None,
        })
        .collect();

    Ok(group_instances(ToolId::Seo, findings))
}

fn parse_kind(kind: &str) -> Severity {
    match kind {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Notice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_mapping() {
        let raw = json!({"issues": [
            {"type": "error", "message": "Missing title tag"},
            {"type": "warning", "message": "Title too long"},
            {"type": "info", "message": "Canonical URL set"}
        ]});

        let issues = parse_response(&raw).unwrap();
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[1].severity, Severity::Warning);
        assert_eq!(issues[2].severity, Severity::Notice);
    }

    #[test]
    fn test_grouped_by_message() {
        let raw = json!({"issues": [
            {"type": "warning", "message": "Image missing alt text", "element": "<img src=\"a\">"},
            {"type": "warning", "message": "Image missing alt text", "element": "<img src=\"b\">"}
        ]});

        let issues = parse_response(&raw).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].occurrences, 2);
        assert_eq!(issues[0].contexts.len(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let raw = json!({"issues": [{}]});
        let issues = parse_response(&raw).unwrap();
        assert_eq!(issues[0].message, "");
        assert_eq!(issues[0].severity, Severity::Notice);
    }

    #[test]
    fn test_empty_analysis() {
        assert!(parse_response(&json!({"score": 92})).unwrap().is_empty());
    }
}
