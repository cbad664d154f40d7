//! Same-origin link extraction from rendered pages
//!
//! Given a page's HTML and the crawl's base host, this module produces the
//! deduplicated set of scannable links: absolute http(s) URLs on the same
//! hostname, with non-HTML file targets filtered out. Extraction failures
//! are soft. A link that cannot be resolved is dropped, and a base URL that
//! cannot be parsed yields an empty result rather than an error.

use scraper::{Html, Selector};
use url::Url;

/// Path extensions that identify non-HTML targets we never scan
const SKIP_EXTENSIONS: &[&str] = &[
    "pdf", "zip", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "jpg", "jpeg", "png", "gif", "svg",
    "webp",
];

/// Resolves the crawl's base host from a user-supplied root URL
///
/// A root URL without a scheme gets `https://` prepended before parsing.
/// Returns `None` when the URL cannot be parsed at all or has no host.
pub fn resolve_base_host(base_url: &str) -> Option<String> {
    let candidate = if base_url.starts_with("http://") || base_url.starts_with("https://") {
        base_url.to_string()
    } else {
        format!("https://{}", base_url)
    };

    Url::parse(&candidate)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Extracts same-origin, scannable links from a rendered page
///
/// Anchors are resolved against the page's own URL (not the crawl root), so
/// relative hrefs on deep pages land where the browser would take them.
/// Order is first-seen document order with duplicates removed.
pub fn extract_links(html: &str, page_url: &Url, base_host: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = std::collections::HashSet::new();
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            // Download links point at files, not pages
            if element.value().attr("download").is_some() {
                continue;
            }

            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };

            if let Some(resolved) = resolve_link(href, page_url, base_host) {
                if seen.insert(resolved.to_string()) {
                    links.push(resolved);
                }
            }
        }
    }

    links
}

/// Resolves one href to an absolute same-origin URL, or rejects it
///
/// Rejected: empty hrefs, fragment-only anchors, `javascript:`/`mailto:`/
/// `tel:`/`data:` schemes, non-http(s) resolutions, binary file extensions,
/// and any hostname that differs from the base host (no subdomain matching).
fn resolve_link(href: &str, page_url: &Url, base_host: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut resolved = page_url.join(href).ok()?;
    // Fragments address within-page positions, never distinct pages
    resolved.set_fragment(None);

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    if has_skipped_extension(resolved.path()) {
        return None;
    }

    if resolved.host_str()? != base_host {
        return None;
    }

    Some(resolved)
}

/// Whether a URL path ends in a known non-HTML extension
fn has_skipped_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    match lower.rsplit_once('.') {
        Some((_, ext)) => SKIP_EXTENSIONS.contains(&ext),
        None => false,
    }
}
