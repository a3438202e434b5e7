// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./velo.toml` > `~/.config/velo/velo.toml` > `/etc/velo/velo.toml`
//! with environment variable overrides via `VELO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::VeloConfig;

/// Top-level sections that environment variables may address.
const SECTIONS: &[&str] = &["api", "session", "logging"];

pub(crate) const SYSTEM_CONFIG: &str = "/etc/velo/velo.toml";
pub(crate) const LOCAL_CONFIG: &str = "velo.toml";

/// Path of the per-user config file, if a config dir exists.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("velo/velo.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/velo/velo.toml` (system-wide)
/// 3. `~/.config/velo/velo.toml` (user XDG config)
/// 4. `./velo.toml` (local directory)
/// 5. `VELO_*` environment variables
pub fn load_config() -> Result<VeloConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<VeloConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VeloConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VeloConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VeloConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(VeloConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `VELO_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `VELO_API_BASE_URL` maps to `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("VELO_").map(|key| section_key(&key.as_str().to_ascii_lowercase()).into())
}

fn section_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
