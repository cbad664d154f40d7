use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use argus_sweep::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Pa11y endpoint: {}", config.scanners.pa11y_endpoint);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[scanners]
pa11y-endpoint = "http://localhost:9001/pa11y"
wave-endpoint = "https://wave.webaim.org/api/request"
ibm-a11y-endpoint = "http://localhost:9001/ibm-a11y"
lighthouse-endpoint = "http://localhost:9001/lighthouse"
seo-endpoint = "http://localhost:9001/seo"
pa11y-timeout-secs = 60
wave-timeout-secs = 45
ibm-a11y-timeout-secs = 60
lighthouse-timeout-secs = 60
seo-timeout-secs = 30

[render]
timeout-secs = 20

[user-agent]
engine-name = "TestEngine"
engine-version = "1.0"
contact-url = "https://example.com/about"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scanners.pa11y_endpoint, "http://localhost:9001/pa11y");
        assert_eq!(config.render.timeout_secs, 20);
        assert_eq!(config.user_agent.engine_name, "TestEngine");
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scanners.pa11y_timeout_secs, 60);
        assert_eq!(config.scanners.wave_timeout_secs, 45);
        assert!(config.user_agent.user_agent().starts_with("ArgusSweep/"));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[scanners]
pa11y-endpoint = ""
wave-endpoint = "https://wave.webaim.org/api/request"
ibm-a11y-endpoint = "http://localhost:9001/ibm-a11y"
lighthouse-endpoint = "http://localhost:9001/lighthouse"
seo-endpoint = "http://localhost:9001/seo"
pa11y-timeout-secs = 60
wave-timeout-secs = 45
ibm-a11y-timeout-secs = 60
lighthouse-timeout-secs = 60
seo-timeout-secs = 30
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
