//! Markdown rendering of a completed crawl

use super::{sorted_issues, wcag_distribution, CrawlResponse};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Formats a crawl response as a human-readable Markdown report
pub fn format_markdown_report(response: &CrawlResponse) -> String {
    let mut md = String::new();

    md.push_str("# Site Quality Report\n\n");

    md.push_str("## Summary\n\n");
    md.push_str(&format!(
        "- **Pages scanned**: {}\n",
        response.summary.pages_scanned
    ));
    md.push_str(&format!("- **Errors**: {}\n", response.summary.total_errors));
    md.push_str(&format!(
        "- **Warnings**: {}\n",
        response.summary.total_warnings
    ));
    md.push_str(&format!(
        "- **Notices**: {}\n",
        response.summary.total_notices
    ));
    md.push_str(&format!(
        "- **Completed cleanly**: {}\n\n",
        if response.success { "yes" } else { "no" }
    ));

    let distribution = wcag_distribution(&response.pages);
    md.push_str("## WCAG Levels\n\n");
    md.push_str("| Level | Issues |\n");
    md.push_str("|-------|--------|\n");
    md.push_str(&format!("| A | {} |\n", distribution.level_a));
    md.push_str(&format!("| AA | {} |\n", distribution.level_aa));
    md.push_str(&format!("| AAA | {} |\n", distribution.level_aaa));
    md.push_str(&format!("| Unclassified | {} |\n\n", distribution.unclassified));

    md.push_str("## Top Issues\n\n");
    let issues = sorted_issues(&response.pages, None);
    if issues.is_empty() {
        md.push_str("No issues found.\n\n");
    } else {
        md.push_str("| Severity | Tool | Code | Occurrences | Message |\n");
        md.push_str("|----------|------|------|-------------|---------|\n");
        for issue in issues.iter().take(25) {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                issue.severity,
                issue.source.display_name(),
                issue.code,
                issue.occurrences,
                issue.message.replace('|', "\\|").replace('\n', " ")
            ));
        }
        md.push('\n');
    }

    md.push_str("## Pages\n\n");
    for page in &response.pages {
        md.push_str(&format!("### {}\n\n", page.url));
        md.push_str(&format!(
            "- **Errors**: {} / **Warnings**: {} / **Notices**: {}\n",
            page.error_count, page.warning_count, page.notice_count
        ));
        for (tool, outcome) in &page.tool_results {
            match outcome.error() {
                Some(error) => md.push_str(&format!("- **{}**: failed ({})\n", tool, error)),
                None => md.push_str(&format!(
                    "- **{}**: {} issues\n",
                    tool,
                    outcome.issues().len()
                )),
            }
        }
        md.push('\n');
    }

    if !response.errors.is_empty() {
        md.push_str("## Crawl Errors\n\n");
        for error in &response.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

/// Writes the Markdown report to the given path
pub fn write_markdown_report(response: &CrawlResponse, path: &Path) -> std::io::Result<()> {
    let md = format_markdown_report(response);
    let mut file = File::create(path)?;
    file.write_all(md.as_bytes())?;
    info!("Markdown report written to {}", path.display());
    Ok(())
}
