use crate::config::types::{AuthConfig, ClientConfig, HttpConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_auth_config(&config.auth)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates the site URLs
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("short-url-base", &config.short_url_base)?;
    validate_http_url("asset-base-url", &config.asset_base_url)?;
    Ok(())
}

/// A lone username or password is accepted; the client just stays anonymous
fn validate_auth_config(config: &AuthConfig) -> Result<(), ConfigError> {
    let has_username = config.username.as_deref().is_some_and(|u| !u.is_empty());
    let has_password = config.password.as_deref().is_some_and(|p| !p.is_empty());

    if has_username != has_password {
        tracing::warn!("Only one of username and password is set, login will be skipped");
    }

    Ok(())
}

/// Validates transport settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a URL parses and uses an HTTP scheme
fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}
