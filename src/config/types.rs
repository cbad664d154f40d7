use crate::scanners::ToolId;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Argus-Sweep
///
/// Holds everything that is stable across crawl runs: where the external
/// scanner services live, how long each may take, and how the engine
/// identifies itself. Per-run parameters (root URL, budgets, enabled tools)
/// arrive with the crawl request instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub scanners: ScannersConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub user_agent: UserAgentConfig,
}

/// Scanner service endpoints and per-tool timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScannersConfig {
    /// Pa11y service endpoint (POST, JSON)
    pub pa11y_endpoint: String,

    /// WAVE API endpoint (GET with key/url query parameters)
    pub wave_endpoint: String,

    /// IBM Equal Access checker service endpoint (POST, JSON)
    pub ibm_a11y_endpoint: String,

    /// Lighthouse auditor service endpoint (POST, JSON)
    pub lighthouse_endpoint: String,

    /// SEO analyzer service endpoint (POST, JSON)
    pub seo_endpoint: String,

    pub pa11y_timeout_secs: u64,
    pub wave_timeout_secs: u64,
    pub ibm_a11y_timeout_secs: u64,
    pub lighthouse_timeout_secs: u64,
    pub seo_timeout_secs: u64,
}

impl Default for ScannersConfig {
    fn default() -> Self {
        Self {
            pa11y_endpoint: "http://127.0.0.1:4000/pa11y".to_string(),
            wave_endpoint: "https://wave.webaim.org/api/request".to_string(),
            ibm_a11y_endpoint: "http://127.0.0.1:4000/ibm-a11y".to_string(),
            lighthouse_endpoint: "http://127.0.0.1:4000/lighthouse".to_string(),
            seo_endpoint: "http://127.0.0.1:4000/seo".to_string(),
            pa11y_timeout_secs: 60,
            wave_timeout_secs: 45,
            ibm_a11y_timeout_secs: 60,
            lighthouse_timeout_secs: 60,
            seo_timeout_secs: 30,
        }
    }
}

impl ScannersConfig {
    /// Service endpoint for a tool
    pub fn endpoint(&self, tool: ToolId) -> &str {
        match tool {
            ToolId::Pa11y => &self.pa11y_endpoint,
            ToolId::Wave => &self.wave_endpoint,
            ToolId::IbmA11y => &self.ibm_a11y_endpoint,
            ToolId::Lighthouse => &self.lighthouse_endpoint,
            ToolId::Seo => &self.seo_endpoint,
        }
    }

    /// Per-tool timeout budget
    pub fn timeout(&self, tool: ToolId) -> Duration {
        let secs = match tool {
            ToolId::Pa11y => self.pa11y_timeout_secs,
            ToolId::Wave => self.wave_timeout_secs,
            ToolId::IbmA11y => self.ibm_a11y_timeout_secs,
            ToolId::Lighthouse => self.lighthouse_timeout_secs,
            ToolId::Seo => self.seo_timeout_secs,
        };
        Duration::from_secs(secs)
    }
}

/// Render collaborator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Per-page render timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl RenderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Engine identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the scan engine
    pub engine_name: String,

    /// Version of the scan engine
    pub engine_version: String,

    /// URL with information about the engine
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            engine_name: "ArgusSweep".to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.invalid/argus-sweep".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent string sent with every outbound request
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.engine_name, self.engine_version, self.contact_url
        )
    }
}
