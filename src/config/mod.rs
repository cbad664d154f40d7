//! Configuration module for Argus-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files holding scanner service endpoints, timeouts, and engine
//! identification. Everything has a sensible default so the engine runs
//! without a config file.
//!
//! # Example
//!
//! ```no_run
//! use argus_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("WAVE endpoint: {}", config.scanners.wave_endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, RenderConfig, ScannersConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::load_config;
pub use validation::validate;
