// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Velo booking client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails at
//! startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};
use velo_core::types::{Role, UserId};
use velo_core::UserSession;

/// Top-level Velo configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VeloConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Identity of the caller.
    #[serde(default)]
    pub session: SessionConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts for idempotent reads after a transient failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

/// The signed-in user. `token = None` makes every request anonymous.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Bearer token obtained from `velo login`.
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub user_id: Option<UserId>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Account role; decides whether the booking flow loads dependent players.
    #[serde(default)]
    pub role: Role,
}

impl SessionConfig {
    /// Builds the explicit session handed to the client and the booking flow.
    pub fn to_user_session(&self) -> UserSession {
        UserSession {
            user_id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            token: self.token.clone().filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
