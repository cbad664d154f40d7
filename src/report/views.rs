//! Read-only views over completed crawl results

use super::PageResult;
use crate::unify::{Impact, Severity, UnifiedIssue, WcagLevel};
use serde::Serialize;

/// Issues collected across pages, in presentation order
pub type SortedIssues<'a> = Vec<&'a UnifiedIssue>;

/// All issues across the given pages, optionally filtered by severity
///
/// Ordering is severity first (errors before warnings before notices), then
/// impact (critical first, unrated last), then occurrence count descending.
pub fn sorted_issues(pages: &[PageResult], severity: Option<Severity>) -> SortedIssues<'_> {
    let mut issues: Vec<&UnifiedIssue> = pages
        .iter()
        .flat_map(|page| page.issues())
        .filter(|issue| severity.map_or(true, |s| issue.severity == s))
        .collect();

    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| impact_rank(a.impact).cmp(&impact_rank(b.impact)))
            .then_with(|| b.occurrences.cmp(&a.occurrences))
    });

    issues
}

fn impact_rank(impact: Option<Impact>) -> u8 {
    match impact {
        Some(Impact::Critical) => 0,
        Some(Impact::Serious) => 1,
        Some(Impact::Moderate) => 2,
        Some(Impact::Minor) => 3,
        None => 4,
    }
}

/// How many distinct issues map to each WCAG conformance tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WcagDistribution {
    pub level_a: u32,
    pub level_aa: u32,
    pub level_aaa: u32,
    pub unclassified: u32,
}

/// Buckets issues by the WCAG level their guideline reference names
pub fn wcag_distribution(pages: &[PageResult]) -> WcagDistribution {
    let mut distribution = WcagDistribution::default();

    for issue in pages.iter().flat_map(|page| page.issues()) {
        match issue.wcag_level() {
            Some(WcagLevel::A) => distribution.level_a += 1,
            Some(WcagLevel::AA) => distribution.level_aa += 1,
            Some(WcagLevel::AAA) => distribution.level_aaa += 1,
            None => distribution.unclassified += 1,
        }
    }

    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::{ToolId, ToolOutcome};

    fn issue(
        code: &str,
        severity: Severity,
        impact: Option<Impact>,
        occurrences: u32,
        wcag: Option<&str>,
    ) -> UnifiedIssue {
        UnifiedIssue {
            code: code.to_string(),
            message: code.to_string(),
            severity,
            source: ToolId::Pa11y,
            occurrences,
            selectors: vec![],
            contexts: vec![],
            impact,
            wcag_guideline: wcag.map(String::from),
        }
    }

    fn page(issues: Vec<UnifiedIssue>) -> PageResult {
        PageResult::new(
            "https://ex.test/".to_string(),
            vec![(
                ToolId::Pa11y,
                ToolOutcome::Ok {
                    issues,
                    raw: serde_json::Value::Null,
                },
            )],
        )
    }

    #[test]
    fn test_sort_severity_then_impact_then_occurrences() {
        let pages = vec![page(vec![
            issue("notice", Severity::Notice, Some(Impact::Minor), 9, None),
            issue("warn", Severity::Warning, Some(Impact::Moderate), 1, None),
            issue("err-minor", Severity::Error, Some(Impact::Minor), 1, None),
            issue("err-crit-few", Severity::Error, Some(Impact::Critical), 2, None),
            issue("err-crit-many", Severity::Error, Some(Impact::Critical), 5, None),
            issue("err-unrated", Severity::Error, None, 7, None),
        ])];

        let codes: Vec<&str> = sorted_issues(&pages, None)
            .iter()
            .map(|i| i.code.as_str())
            .collect();

        assert_eq!(
            codes,
            vec![
                "err-crit-many",
                "err-crit-few",
                "err-minor",
                "err-unrated",
                "warn",
                "notice"
            ]
        );
    }

    #[test]
    fn test_severity_filter() {
        let pages = vec![page(vec![
            issue("e", Severity::Error, None, 1, None),
            issue("w", Severity::Warning, None, 1, None),
        ])];

        let filtered = sorted_issues(&pages, Some(Severity::Warning));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].code, "w");
    }

    #[test]
    fn test_wcag_distribution() {
        let pages = vec![page(vec![
            issue("a", Severity::Error, None, 1, Some("1.1.1 Non-text Content (Level A)")),
            issue("aa", Severity::Error, None, 1, Some("WCAG2AA.1.4.3")),
            issue("aaa", Severity::Error, None, 1, Some("WCAG2AAA.1.4.6")),
            issue("none", Severity::Error, None, 1, None),
        ])];

        let distribution = wcag_distribution(&pages);
        assert_eq!(distribution.level_a, 1);
        assert_eq!(distribution.level_aa, 1);
        assert_eq!(distribution.level_aaa, 1);
        assert_eq!(distribution.unclassified, 1);
    }
}
