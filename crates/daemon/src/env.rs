// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use unilog_core::LoggingConfig;

/// Overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "UNILOG_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config/logging.json";

/// Resolve config file path: UNILOG_CONFIG > config/logging.json
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Apply overrides using `lookup` to read variables.
///
/// Integers that fail to parse are warned about and ignored. Booleans are
/// true for `true`, `1`, `yes`, `on` (any case) and false otherwise.
pub fn apply_overrides_from(config: &mut LoggingConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("LOG_FILE_PATH") {
        config.log_file_path = PathBuf::from(v);
    }
    if let Some(v) = parse_int(&lookup, "MAX_FILE_SIZE_MB") {
        config.max_file_size_mb = v;
    }
    if let Some(v) = parse_int(&lookup, "ROTATION_COUNT") {
        config.rotation_count = v;
    }
    if let Some(v) = lookup("FLUSH_IMMEDIATELY") {
        config.flush_immediately = parse_bool(&v);
    }
    if let Some(v) = parse_int(&lookup, "API_PORT") {
        config.api_port = v;
    }
    if let Some(v) = lookup("API_HOST") {
        config.api_host = v;
    }
    if let Some(v) = lookup("LOG_LEVEL") {
        config.log_level = v;
    }
    if let Some(v) = lookup("ENABLED") {
        config.enabled = parse_bool(&v);
    }
}

fn parse_int<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "invalid integer value, ignoring");
            None
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
