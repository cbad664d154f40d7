//! Pa11y adapter
//!
//! Drives a Pa11y service (HTML_CodeSniffer runner) over HTTP. Pa11y reports
//! one raw finding per DOM instance, so findings are grouped by rule code
//! into one unified issue with the instance count as `occurrences`.

use super::{guard, ScannerAdapter, ToolId, ToolOutcome};
use crate::unify::{
    group_instances, impact_from_severity, is_contrast_code, Impact, InstanceFinding, Severity,
    UnifiedIssue,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Pa11y's native result payload
#[derive(Debug, Deserialize)]
struct Pa11yResult {
    #[serde(default)]
    issues: Vec<Pa11yIssue>,
}

#[derive(Debug, Deserialize)]
struct Pa11yIssue {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
    selector: Option<String>,
    context: Option<String>,
    impact: Option<String>,
    wcag: Option<String>,
}

pub struct Pa11yAdapter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl Pa11yAdapter {
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
                "standard": "WCAG2AA",
                "includeNotices": true,
                "includeWarnings": true,
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
impl ScannerAdapter for Pa11yAdapter {
    fn tool(&self) -> ToolId {
        ToolId::Pa11y
    }

    async fn run(&self, url: &Url) -> ToolOutcome {
        guard(self.tool(), self.timeout, self.scan(url)).await
    }
}

/// Parses Pa11y's payload into grouped unified issues
///
/// Total over any shape Pa11y can produce: missing fields default, unknown
/// severity strings classify as notices, contrast rules are promoted to
/// errors regardless of Pa11y's own bucket.
fn parse_response(raw: &serde_json::Value) -> Result<Vec<UnifiedIssue>, String> {
    let result: Pa11yResult = serde_json::from_value(raw.clone())
        .map_err(|e| format!("unexpected payload shape: {}", e))?;

    let findings: Vec<InstanceFinding> = result
        .issues
        .into_iter()
        .map(|issue| {
            let severity = if is_contrast_code(&issue.code) {
                Severity::Error
            } else {
                parse_severity(&issue.kind)
            };

            let impact = issue
                .impact
                .as_deref()
                .and_then(parse_impact)
                .unwrap_or_else(|| impact_from_severity(severity));

            InstanceFinding {
                code: issue.code,
                message: issue.message,
                severity,
                selector: issue.selector,
                context: issue.context,
                impact: Some(impact),
                wcag_guideline: issue.wcag,
            }
        })
        .collect();

    Ok(group_instances(ToolId::Pa11y, findings))
}

fn parse_severity(kind: &str) -> Severity {
    match kind {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_groups_repeated_codes() {
        let raw = json!({
            "documentTitle": "Home",
            "issues": [
                {"code": "img_alt_missing", "message": "Img element missing an alt attribute",
                 "type": "error", "selector": "#a > img", "context": "<img src=\"a.png\">"},
                {"code": "img_alt_missing", "message": "Img element missing an alt attribute",
                 "type": "error", "selector": "#b > img", "context": "<img src=\"b.png\">"},
                {"code": "label_missing", "message": "Form field has no label",
                 "type": "error", "selector": "#f > input"}
            ]
        });

        let issues = parse_response(&raw).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, "img_alt_missing");
        assert_eq!(issues[0].occurrences, 2);
        assert_eq!(issues[0].selectors, vec!["#a > img", "#b > img"]);
        assert_eq!(issues[1].occurrences, 1);
    }

    #[test]
    fn test_native_severities_map_one_to_one() {
        let raw = json!({"issues": [
            {"code": "e", "message": "m", "type": "error"},
            {"code": "w", "message": "m", "type": "warning"},
            {"code": "n", "message": "m", "type": "notice"},
            {"code": "x", "message": "m", "type": "mystery"}
        ]});

        let issues = parse_response(&raw).unwrap();
        let severities: Vec<Severity> = issues.iter().map(|i| i.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Error,
                Severity::Warning,
                Severity::Notice,
                Severity::Notice
            ]
        );
    }

    #[test]
    fn test_contrast_forced_to_error() {
        let raw = json!({"issues": [
            {"code": "WCAG2AA.Principle1.Guideline1_4.1_4_3.G18.Fail",
             "message": "Insufficient contrast", "type": "warning"}
        ]});

        let issues = parse_response(&raw).unwrap();
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_missing_fields_default() {
        let raw = json!({"issues": [{"code": "bare"}]});
        let issues = parse_response(&raw).unwrap();
        assert_eq!(issues[0].message, "");
        assert_eq!(issues[0].occurrences, 1);
        assert_eq!(issues[0].severity, Severity::Notice);
    }

    #[test]
    fn test_derived_impact() {
        let raw = json!({"issues": [
            {"code": "a", "message": "m", "type": "error"},
            {"code": "b", "message": "m", "type": "warning", "impact": "critical"}
        ]});

        let issues = parse_response(&raw).unwrap();
        assert_eq!(issues[0].impact, Some(Impact::Serious));
        assert_eq!(issues[1].impact, Some(Impact::Critical));
    }

    #[test]
    fn test_empty_payload_yields_no_issues() {
        let issues = parse_response(&json!({})).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_wrong_shape_fails_closed() {
        assert!(parse_response(&json!({"issues": "not-a-list"})).is_err());
    }
}
