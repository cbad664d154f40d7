//! Render collaborator client
//!
//! The crawl engine treats page rendering as an external capability: give it
//! a URL, get back the page's final URL, HTTP status, and HTML. This module
//! implements that contract over plain HTTP with reqwest. Each render is a
//! scoped acquisition: the response is fully consumed (or abandoned) within
//! one call, so no connection or body handle outlives the page being
//! processed.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A rendered page, ready for link extraction
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status: u16,

    /// Page HTML
    pub html: String,
}

/// Errors from a single render attempt
///
/// All of these are recoverable at the crawl level: the page still counts
/// against the budget, its link discovery is skipped, and the failure is
/// recorded as a crawl error.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("expected HTML, got {0}")]
    NotHtml(String),

    #[error("{0}")]
    Network(String),
}

/// Builds the HTTP client shared by the renderer and the scanner adapters
///
/// Construction failure here is the one unrecoverable setup error: without a
/// client no page can be processed at all.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetch-based renderer with a per-page timeout
#[derive(Debug, Clone)]
pub struct Renderer {
    client: Client,
    timeout: Duration,
}

impl Renderer {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Renders one page
    ///
    /// The whole round trip (request, redirects, body download) must finish
    /// within the configured timeout. Non-2xx statuses and non-HTML payloads
    /// are render failures: there is nothing to extract links from.
    pub async fn render(&self, url: &Url) -> Result<RenderedPage, RenderError> {
        let fetch = async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| RenderError::Network(e.to_string()))?;

            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return Err(RenderError::Status(status.as_u16()));
            }

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            if !content_type.contains("text/html") {
                return Err(RenderError::NotHtml(content_type));
            }

            let html = response
                .text()
                .await
                .map_err(|e| RenderError::Network(e.to_string()))?;

            Ok(RenderedPage {
                final_url,
                status: status.as_u16(),
                html,
            })
        };

        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn renderer() -> Renderer {
        let client = build_http_client("TestEngine/1.0").unwrap();
        Renderer::new(client, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_render_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "<html><body>hi</body></html>",
                "text/html; charset=utf-8",
            ))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let page = renderer().render(&url).await.unwrap();
        assert_eq!(page.status, 200);
        assert!(page.html.contains("hi"));
    }

    #[tokio::test]
    async fn test_render_non_html_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let result = renderer().render(&url).await;
        assert!(matches!(result, Err(RenderError::NotHtml(_))));
    }

    #[tokio::test]
    async fn test_render_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let result = renderer().render(&url).await;
        assert!(matches!(result, Err(RenderError::Status(500))));
    }

    #[tokio::test]
    async fn test_render_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html></html>", "text/html")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = build_http_client("TestEngine/1.0").unwrap();
        let renderer = Renderer::new(client, Duration::from_millis(100));
        let url = Url::parse(&server.uri()).unwrap();
        let result = renderer.render(&url).await;
        assert!(matches!(result, Err(RenderError::Timeout(_))));
    }
}
