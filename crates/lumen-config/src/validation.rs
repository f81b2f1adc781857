// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-zero ports, usable base URLs and a positive quota.

use crate::diagnostic::ConfigError;
use crate::model::LumenConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LumenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::validation("agent.name must not be empty"));
    }

    let level = config.agent.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level `{}` is not one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.agent.error_notice.trim().is_empty() {
        errors.push(ConfigError::validation(
            "agent.error_notice must not be empty",
        ));
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("gateway.host must not be empty"));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::validation(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::validation("gateway.port must not be 0"));
    }

    if let Some(token) = &config.gateway.bearer_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "gateway.bearer_token must not be blank; remove it to disable auth",
        ));
    }

    check_http_url("openai.base_url", &config.openai.base_url, &mut errors);
    check_http_url("storage.base_url", &config.storage.base_url, &mut errors);

    if config.openai.model.trim().is_empty() {
        errors.push(ConfigError::validation("openai.model must not be empty"));
    }

    if config.quota.window_minutes == 0 {
        errors.push(ConfigError::validation(
            "quota.window_minutes must be at least 1",
        ));
    }

    if config.quota.max_requests == 0 {
        errors.push(ConfigError::validation(
            "quota.max_requests must be at least 1",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(key: &str, url: &str, errors: &mut Vec<ConfigError>) {
    let url = url.trim();
    let has_host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        errors.push(ConfigError::validation(format!(
            "{key} `{url}` must be an http:// or https:// URL"
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&LumenConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = LumenConfig::default();
        config.gateway.port = 0;
        config.quota.max_requests = 0;
        config.storage.base_url = "ftp://example.com".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "got: {errors:?}");
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = LumenConfig::default();
        config.agent.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());

        config.agent.log_level = "verbose".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("agent.log_level"));
    }

    #[test]
    fn blank_bearer_token_is_rejected() {
        let mut config = LumenConfig::default();
        config.gateway.bearer_token = Some("  ".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn bare_scheme_is_not_a_url() {
        let mut errors = Vec::new();
        check_http_url("openai.base_url", "https://", &mut errors);
        assert_eq!(errors.len(), 1);
    }
}
