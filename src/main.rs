//! Argus-Sweep main entry point
//!
//! Command-line interface for running one crawl-and-scan job.

use anyhow::Context;
use argus_sweep::config::load_config;
use argus_sweep::report::{format_markdown_report, write_markdown_report};
use argus_sweep::{Config, Coordinator, CrawlJob, CrawlStatus, ToolId};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Argus-Sweep: a multi-scanner web-quality crawl engine
///
/// Crawls a site breadth-first from a root URL and runs a set of external
/// web-quality scanners against every page, aggregating their findings into
/// one unified report.
#[derive(Parser, Debug)]
#[command(name = "argus-sweep")]
#[command(version)]
#[command(about = "Crawl a site and aggregate web-quality scanner results", long_about = None)]
struct Cli {
    /// Root URL to crawl (a bare hostname is accepted)
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of pages to scan
    #[arg(long, default_value_t = argus_sweep::crawler::DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Wall-clock budget in seconds; partial results are returned on expiry
    #[arg(long)]
    max_duration_secs: Option<u64>,

    /// Comma-separated list of tools to run (default: all)
    ///
    /// Known tools: pa11y, wave, seo, lighthouse, ibm-a11y
    #[arg(long, value_delimiter = ',')]
    tools: Option<Vec<ToolId>>,

    /// WAVE API key; falls back to the WAVE_API_KEY environment variable
    #[arg(long, env = "WAVE_API_KEY")]
    wave_api_key: Option<String>,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    output: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Short human-readable totals
    Summary,
    /// Full response as pretty-printed JSON
    Json,
    /// Markdown report
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };

    let mut job = CrawlJob::new(cli.url.clone());
    job.max_pages = cli.max_pages;
    job.max_duration_secs = cli.max_duration_secs;
    job.wave_api_key = cli.wave_api_key.clone();
    if let Some(tools) = &cli.tools {
        job.enabled_tools = tools.clone();
    }

    let coordinator = Coordinator::new(config).context("building HTTP client")?;
    let (response, status) = coordinator
        .run(&job)
        .await
        .with_context(|| format!("crawling {}", cli.url))?;

    if status == CrawlStatus::TimedOut {
        tracing::warn!("Crawl timed out, results are partial");
    }

    match cli.output {
        OutputFormat::Summary => {
            println!("Pages scanned: {}", response.summary.pages_scanned);
            println!("Errors:        {}", response.summary.total_errors);
            println!("Warnings:      {}", response.summary.total_warnings);
            println!("Notices:       {}", response.summary.total_notices);
            if !response.errors.is_empty() {
                println!("\nCrawl errors:");
                for error in &response.errors {
                    println!("  - {}", error);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            match &cli.output_file {
                Some(path) => std::fs::write(path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        OutputFormat::Markdown => match &cli.output_file {
            Some(path) => write_markdown_report(&response, path)
                .with_context(|| format!("writing {}", path.display()))?,
            None => print!("{}", format_markdown_report(&response)),
        },
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("argus_sweep=info,warn"),
            1 => EnvFilter::new("argus_sweep=debug,info"),
            2 => EnvFilter::new("argus_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
