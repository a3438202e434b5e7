// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Velo configuration system.

use velo_config::diagnostic::ConfigError;
use velo_config::{load_and_validate_str, load_config_from_path, load_config_from_str};
use velo_core::Role;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_velo_config() {
    let toml = r#"
[api]
base_url = "https://book.houseofvelo.com/api"
timeout_secs = 10
max_retries = 2

[session]
token = "eyJhbGciOi"
user_id = 7
name = "Pat"
email = "pat@example.com"
role = "PARENT"

[logging]
level = "debug"
json = true
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.api.base_url, "https://book.houseofvelo.com/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.api.max_retries, 2);
    assert_eq!(config.session.token.as_deref(), Some("eyJhbGciOi"));
    assert_eq!(config.session.user_id, Some(7));
    assert_eq!(config.session.role, Role::Parent);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);

    let session = config.session.to_user_session();
    assert!(session.manages_players());
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.api.base_url, "http://localhost:8080/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.max_retries, 1);
    assert!(config.session.token.is_none());
    assert_eq!(config.session.role, Role::Player);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn unknown_field_in_api_is_rejected() {
    let toml = r#"
[api]
base_ur = "http://x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ur"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Diagnostics carry a suggestion for a near-miss key.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[session]
rloe = "PARENT"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "rloe");
            assert_eq!(suggestion.as_deref(), Some("role"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_role_is_rejected() {
    let toml = r#"
[session]
role = "COACH"
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[api]
base_url = "ftp://files"

[logging]
level = "chatty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[api]
base_url = "http://from-file:8080/api"
timeout_secs = 5
"#,
        )?;
        jail.set_env("VELO_API_BASE_URL", "http://from-env:9090/api");
        jail.set_env("VELO_SESSION_ROLE", "TRAINER");

        let config = load_config_from_path(std::path::Path::new("custom.toml"))
            .expect("config should load");
        assert_eq!(config.api.base_url, "http://from-env:9090/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.session.role, Role::Trainer);
        Ok(())
    });
}

#[test]
fn missing_config_file_is_skipped() {
    figment::Jail::expect_with(|_jail| {
        let config = load_config_from_path(std::path::Path::new("/nonexistent/velo.toml"))
            .expect("missing file should be silently skipped");
        assert_eq!(config.api.timeout_secs, 30);
        Ok(())
    });
}
