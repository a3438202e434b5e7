// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::VeloConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const MAX_RETRIES: u32 = 5;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors; does not fail fast.
pub fn validate_config(config: &VeloConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    let host = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"));
    match host {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {}
        _ => errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must be an absolute http(s) URL"),
        }),
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.api.max_retries > MAX_RETRIES {
        errors.push(ConfigError::Validation {
            message: format!(
                "api.max_retries must be at most {MAX_RETRIES}, got {}",
                config.api.max_retries
            ),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&VeloConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = VeloConfig::default();
        config.api.base_url = "localhost:8080".into();
        config.api.timeout_secs = 0;
        config.api.max_retries = 9;
        config.logging.level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_url_without_host() {
        let mut config = VeloConfig::default();
        config.api.base_url = "https:///api".into();
        assert!(validate_config(&config).is_err());
    }
}
