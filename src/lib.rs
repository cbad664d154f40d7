//! Argus-Sweep: a multi-scanner web-quality crawl engine
//!
//! This crate crawls a site breadth-first and, for each page, fans out a set
//! of external web-quality scanners (accessibility checkers and an SEO /
//! performance auditor) concurrently, normalizes their heterogeneous results
//! into one unified issue model, and aggregates everything into a run-level
//! report under page, frontier, and wall-clock budgets.

pub mod config;
pub mod crawler;
pub mod links;
pub mod render;
pub mod report;
pub mod scanners;
pub mod unify;

use thiserror::Error;

/// Main error type for Argus-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid crawl request: {0}")]
    InvalidRequest(String),

    #[error("Setup failed: {0}")]
    Setup(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Argus-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlJob, CrawlStatus};
pub use report::{CrawlResponse, PageResult, RunSummary};
pub use scanners::{ScannerAdapter, ToolId, ToolOutcome};
pub use unify::{Impact, Severity, UnifiedIssue, WcagLevel};
