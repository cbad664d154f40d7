//! IBM Equal Access adapter
//!
//! Drives an IBM accessibility-checker service. The checker reports one
//! result per DOM instance with a `level` classification; results are
//! grouped by rule id into unified issues.

use super::{guard, ScannerAdapter, ToolId, ToolOutcome};
use crate::unify::{
    group_instances, impact_from_severity, is_contrast_code, Impact, InstanceFinding, Severity,
    UnifiedIssue,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct IbmReport {
    #[serde(default)]
    results: Vec<IbmResult>,
}

#[derive(Debug, Deserialize)]
struct IbmResult {
    #[serde(default)]
    level: String,
    #[serde(rename = "ruleId", default)]
    rule_id: String,
    #[serde(default)]
    message: String,
    snippet: Option<String>,
    impact: Option<String>,
    path: Option<IbmPath>,
}

#[derive(Debug, Deserialize)]
struct IbmPath {
    dom: Option<String>,
}

pub struct IbmA11yAdapter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl IbmA11yAdapter {
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
impl ScannerAdapter for IbmA11yAdapter {
    fn tool(&self) -> ToolId {
        ToolId::IbmA11y
    }

    async fn run(&self, url: &Url) -> ToolOutcome {
        guard(self.tool(), self.timeout, self.scan(url)).await
    }
}

/// Parses an IBM checker report into grouped unified issues
///
/// Levels map: violation is an error, potential violation a warning, and
/// everything else (recommendation, needs review) a notice. Contrast rules
/// are promoted to errors.
fn parse_response(raw: &serde_json::Value) -> Result<Vec<UnifiedIssue>, String> {
    let report: IbmReport = serde_json::from_value(raw.clone())
        .map_err(|e| format!("unexpected payload shape: {}", e))?;

    let findings: Vec<InstanceFinding> = report
        .results
        .into_iter()
        .map(|result| {
            let severity = if is_contrast_code(&result.rule_id) {
                Severity::Error
            } else {
                parse_level(&result.level)
            };

            let impact = result
                .impact
                .as_deref()
                .and_then(parse_impact)
                .unwrap_or_else(|| impact_from_severity(severity));

            InstanceFinding {
                code: result.rule_id,
                message: result.message,
                severity,
                selector: result.path.and_then(|p| p.dom),
                context: result.snippet,
                impact: Some(impact),
                wcag_guideline: None,
            }
        })
        .collect();

    Ok(group_instances(ToolId::IbmA11y, findings))
}

fn parse_level(level: &str) -> Severity {
    match level {
        "violation" => Severity::Error,
        "potentialviolation" => Severity::Warning,
        _ => Severity::Notice,
    }
}

fn parse_impact(impact: &str) -> Option<Impact> {
    match impact {
        "critical" => Some(Impact::Critical),
        "serious" => Some(Impact::Serious),
        "moderate" => Some(Impact::Moderate),
        "minor" => Some(Impact::Minor),
        _ => None,
    }
}
