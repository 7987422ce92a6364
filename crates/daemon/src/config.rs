// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading: JSON file, then environment overrides, then validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};
use unilog_core::{LogFormatConfig, LoggingConfig};

use crate::env;
use crate::error::DaemonError;

/// Partial update for a live configuration.
///
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigUpdate {
    pub log_file_path: Option<PathBuf>,
    pub max_file_size_mb: Option<u64>,
    pub rotation_count: Option<u32>,
    pub flush_immediately: Option<bool>,
    pub api_port: Option<u16>,
    pub api_host: Option<String>,
    pub log_level: Option<String>,
    pub enabled: Option<bool>,
    pub format_config: Option<LogFormatConfig>,
}

impl ConfigUpdate {
    /// Parse an update from JSON, rejecting unknown keys.
    pub fn from_json(json: &str) -> Result<Self, DaemonError> {
        serde_json::from_str(json).map_err(DaemonError::ConfigUpdate)
    }

    fn apply(self, config: &mut LoggingConfig) {
        if let Some(v) = self.log_file_path {
            config.log_file_path = v;
        }
        if let Some(v) = self.max_file_size_mb {
            config.max_file_size_mb = v;
        }
        if let Some(v) = self.rotation_count {
            config.rotation_count = v;
        }
        if let Some(v) = self.flush_immediately {
            config.flush_immediately = v;
        }
        if let Some(v) = self.api_port {
            config.api_port = v;
        }
        if let Some(v) = self.api_host {
            config.api_host = v;
        }
        if let Some(v) = self.log_level {
            config.log_level = v;
        }
        if let Some(v) = self.enabled {
            config.enabled = v;
        }
        if let Some(v) = self.format_config {
            config.format_config = v;
        }
    }
}

/// Owns the loaded configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    config: LoggingConfig,
}

impl ConfigManager {
    /// Load from `path` with overrides from the process environment.
    pub fn load(path: &Path) -> Result<Self, DaemonError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Load from `path` using `lookup` for environment overrides.
    ///
    /// A missing file means defaults. An unreadable or malformed file is
    /// warned about and also falls back to defaults. Validation failures
    /// are errors.
    pub fn load_with(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DaemonError> {
        let mut config = read_config_file(path);
        env::apply_overrides_from(&mut config, lookup);
        config.validate()?;
        Ok(Self {
            path: path.to_owned(),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current configuration.
    pub fn get(&self) -> LoggingConfig {
        self.config.clone()
    }

    /// Apply a partial update. A rejected update leaves the config unchanged.
    pub fn update(&mut self, update: ConfigUpdate) -> Result<&LoggingConfig, DaemonError> {
        let mut candidate = self.config.clone();
        update.apply(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(&self.config)
    }

    /// Write the config as pretty JSON to `path` (or the path it was loaded from).
    pub fn save(&self, path: Option<&Path>) -> Result<(), DaemonError> {
        let path = path.unwrap_or(&self.path);
        let json = serde_json::to_string_pretty(&self.config)?;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)
        };
        write().map_err(|e| DaemonError::SaveFailed(path.to_owned(), e))?;
        info!(path = %path.display(), "saved configuration");
        Ok(())
    }
}

fn read_config_file(path: &Path) -> LoggingConfig {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LoggingConfig::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
            return LoggingConfig::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
            LoggingConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
