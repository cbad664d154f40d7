use crate::config::types::{Config, RenderConfig, ScannersConfig, UserAgentConfig};
use crate::scanners::ToolId;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scanners_config(&config.scanners)?;
    validate_render_config(&config.render)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates scanner endpoints and timeouts
fn validate_scanners_config(config: &ScannersConfig) -> Result<(), ConfigError> {
    for tool in ToolId::ALL {
        let endpoint = config.endpoint(tool);
        if endpoint.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} endpoint cannot be empty",
                tool
            )));
        }

        Url::parse(endpoint).map_err(|e| {
            ConfigError::Validation(format!("Invalid {} endpoint '{}': {}", tool, endpoint, e))
        })?;

        if config.timeout(tool).is_zero() {
            return Err(ConfigError::Validation(format!(
                "{} timeout must be >= 1 second",
                tool
            )));
        }
    }

    Ok(())
}

/// Validates render collaborator configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "render timeout must be >= 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates engine identification
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.engine_name.is_empty() {
        return Err(ConfigError::Validation(
            "engine_name cannot be empty".to_string(),
        ));
    }

    if !config
        .engine_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "engine_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.engine_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}
