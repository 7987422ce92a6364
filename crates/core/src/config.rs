// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide logging configuration.
//!
//! Loaded once at startup (see the daemon's config loader) and then treated
//! as read-mostly. Live changes go through the writer so they are ordered
//! against in-flight appends.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Levels accepted for `log_level`, lowest first.
pub const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

/// Errors from validating a `LoggingConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_file_size_mb must be greater than 0")]
    MaxFileSize,
    #[error("api_port must be between 1 and 65535")]
    ApiPort,
    #[error("log_level must be one of: {}", LOG_LEVELS.join(", "))]
    LogLevel(String),
}

/// How the timestamp field is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// Caller-supplied string, untouched
    #[default]
    Iso,
    /// Calendar string in the process-local timezone
    Local,
    /// Integer seconds since the Unix epoch
    Unix,
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFormat::Iso => write!(f, "iso"),
            TimestampFormat::Local => write!(f, "local"),
            TimestampFormat::Unix => write!(f, "unix"),
        }
    }
}

/// Which fields the formatter includes and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFormatConfig {
    pub include_timestamp: bool,
    pub timestamp_format: TimestampFormat,
    pub include_source: bool,
    pub include_context: bool,
    /// Maximum message length in characters; `None` disables truncation
    pub max_message_length: Option<usize>,
}

impl Default for LogFormatConfig {
    fn default() -> Self {
        Self {
            include_timestamp: true,
            timestamp_format: TimestampFormat::Iso,
            include_source: true,
            include_context: true,
            max_message_length: Some(1000),
        }
    }
}

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Active log file; backups live next to it
    pub log_file_path: PathBuf,
    /// Size threshold that triggers rotation
    pub max_file_size_mb: u64,
    /// Number of numbered backups to keep
    pub rotation_count: u32,
    /// fsync after every append
    pub flush_immediately: bool,
    pub api_port: u16,
    pub api_host: String,
    /// Minimum level for backend diagnostics funneled into the unified file
    pub log_level: String,
    /// Master switch for backend diagnostics
    pub enabled: bool,
    pub format_config: LogFormatConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file_path: PathBuf::from("logs/unified.log"),
            max_file_size_mb: 10,
            rotation_count: 5,
            flush_immediately: true,
            api_port: 8000,
            api_host: "127.0.0.1".to_string(),
            log_level: "INFO".to_string(),
            enabled: true,
            format_config: LogFormatConfig::default(),
        }
    }
}

impl LoggingConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size_mb == 0 {
            return Err(ConfigError::MaxFileSize);
        }
        if self.api_port == 0 {
            return Err(ConfigError::ApiPort);
        }
        if level_rank(&self.log_level).is_none() {
            return Err(ConfigError::LogLevel(self.log_level.clone()));
        }
        Ok(())
    }

    /// Whether a diagnostic at `level` (e.g. `"WARNING"`) should be recorded.
    ///
    /// Unknown configured levels behave like `INFO`; unknown checked levels
    /// behave like `DEBUG`.
    pub fn is_level_enabled(&self, level: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let current = level_rank(&self.log_level).unwrap_or(1);
        let check = level_rank(&level.to_ascii_uppercase()).unwrap_or(0);
        check >= current
    }
}

fn level_rank(level: &str) -> Option<usize> {
    LOG_LEVELS.iter().position(|l| *l == level)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
