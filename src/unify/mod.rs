//! Unified issue model and normalization helpers
//!
//! Every scanner adapter translates its tool's native findings into
//! [`UnifiedIssue`] values at construction time. Severity is a closed enum,
//! so a finding can never reach the aggregation layer with an ambiguous
//! classification. Normalization is total: unknown or missing fields map to
//! safe defaults instead of errors.

use crate::scanners::ToolId;
use serde::{Deserialize, Serialize};

/// Unified severity of a finding
///
/// Declaration order doubles as sort order: errors first, notices last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Notice,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Notice => write!(f, "notice"),
        }
    }
}

/// Impact rating carried by some tools (axe-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Critical => write!(f, "critical"),
            Impact::Serious => write!(f, "serious"),
            Impact::Moderate => write!(f, "moderate"),
            Impact::Minor => write!(f, "minor"),
        }
    }
}

/// WCAG conformance tier a rule maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

/// One normalized finding, tool-agnostic
///
/// Constructed once by an adapter, then aggregated (never mutated) into a
/// page result and the run summary. Field names serialize in camelCase so
/// downstream consumers see a stable shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedIssue {
    /// Tool-specific rule identifier
    pub code: String,

    /// Human-readable description of the finding
    pub message: String,

    /// Unified severity classification
    pub severity: Severity,

    /// Which tool detected this issue
    pub source: ToolId,

    /// Number of raw instances this issue represents (always >= 1)
    pub occurrences: u32,

    /// CSS/XPath locators, one per occurrence when available
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,

    /// Matching HTML snippets, in occurrence order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,

    /// Impact rating, when the tool reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,

    /// WCAG guideline reference string, when the tool reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wcag_guideline: Option<String>,
}

impl UnifiedIssue {
    /// WCAG conformance level derived from the guideline reference
    pub fn wcag_level(&self) -> Option<WcagLevel> {
        self.wcag_guideline.as_deref().and_then(extract_wcag_level)
    }
}

/// One raw per-DOM-instance finding, before code-level grouping
///
/// Adapters whose tools report one entry per DOM instance (pa11y, IBM,
/// the SEO analyzer) convert each raw entry into an `InstanceFinding` and
/// let [`group_instances`] collapse them by rule code.
#[derive(Debug, Clone)]
pub struct InstanceFinding {
    pub code: String,
    pub message: String,
    pub severity: Severity,
    pub selector: Option<String>,
    pub context: Option<String>,
    pub impact: Option<Impact>,
    pub wcag_guideline: Option<String>,
}

/// Collapses per-instance findings into one [`UnifiedIssue`] per rule code
///
/// `occurrences` becomes the instance count and selectors/contexts the
/// ordered sequence across all instances. First-seen code order is
/// preserved. The first instance's message, severity, impact, and WCAG
/// reference stand for the group.
pub fn group_instances(source: ToolId, findings: Vec<InstanceFinding>) -> Vec<UnifiedIssue> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: std::collections::HashMap<String, Vec<InstanceFinding>> =
        std::collections::HashMap::new();

    for finding in findings {
        if !groups.contains_key(&finding.code) {
            order.push(finding.code.clone());
        }
        groups.entry(finding.code.clone()).or_default().push(finding);
    }

    order
        .into_iter()
        .filter_map(|code| {
            let instances = groups.remove(&code)?;
            let first = instances.first()?.clone();
            let occurrences = instances.len() as u32;
            let selectors: Vec<String> =
                instances.iter().filter_map(|i| i.selector.clone()).collect();
            let contexts: Vec<String> =
                instances.iter().filter_map(|i| i.context.clone()).collect();

            Some(UnifiedIssue {
                code,
                message: first.message,
                severity: first.severity,
                source,
                occurrences,
                selectors,
                contexts,
                impact: first.impact,
                wcag_guideline: first.wcag_guideline,
            })
        })
        .collect()
}

/// Extracts the WCAG conformance level from a guideline reference string
///
/// Checks AAA before AA before A since the shorter strings are substrings
/// of the longer ones.
pub fn extract_wcag_level(wcag: &str) -> Option<WcagLevel> {
    if wcag.contains("AAA") {
        Some(WcagLevel::AAA)
    } else if wcag.contains("AA") {
        Some(WcagLevel::AA)
    } else if wcag.contains('A') {
        Some(WcagLevel::A)
    } else {
        None
    }
}

/// Whether a rule code identifies a color-contrast finding
///
/// Contrast failures are treated as blocking: findings matching here are
/// classified `error` no matter which bucket the tool itself used. G18 and
/// G145 are the HTML_CodeSniffer contrast techniques.
pub fn is_contrast_code(code: &str) -> bool {
    let lower = code.to_ascii_lowercase();
    lower.contains("contrast") || code.contains(".G18.") || code.contains(".G145.")
}

/// Derives an impact rating from severity when the tool reports none
pub fn impact_from_severity(severity: Severity) -> Impact {
    match severity {
        Severity::Error => Impact::Serious,
        Severity::Warning => Impact::Moderate,
        Severity::Notice => Impact::Minor,
    }
}
