// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only writer for the unified log file.
//!
//! Every call opens the active path, appends, optionally syncs, closes, and
//! then checks rotation. No handle outlives a call, so a rotation (which
//! renames the active path) can never leave a later append pointed at a
//! backup file.
//!
//! One `LogWriter` owns one file path. Its mutex covers format + append +
//! rotate and also guards the configuration, so a live config change is
//! ordered against in-flight writes.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use unilog_core::{LogEntry, LoggingConfig};

use crate::fallback::{Fallback, StderrFallback};
use crate::format::{format_entry, FormatError};
use crate::rotate::RotationPolicy;

/// Errors surfaced by [`LogWriter::write_batch`].
///
/// Full detail (including the file path) has already gone to the fallback
/// by the time a caller sees one of these.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to format entry {index}: {source}")]
    Format {
        index: usize,
        #[source]
        source: FormatError,
    },
    #[error("failed to append to log file: {0}")]
    Io(#[source] io::Error),
    #[error("failed to rotate log file: {0}")]
    Rotate(#[source] io::Error),
}

/// Writer for one unified log file.
pub struct LogWriter {
    config: Mutex<LoggingConfig>,
    fallback: Arc<dyn Fallback>,
}

impl LogWriter {
    /// Create a writer that reports failures on stderr.
    pub fn new(config: LoggingConfig) -> Self {
        Self::with_fallback(config, Arc::new(StderrFallback))
    }

    /// Create a writer with an explicit fallback channel.
    ///
    /// The parent directory of the log path is created here; failure is
    /// reported to the fallback and the first write surfaces the real error.
    pub fn with_fallback(config: LoggingConfig, fallback: Arc<dyn Fallback>) -> Self {
        ensure_parent_dir(&config.log_file_path, fallback.as_ref());
        Self {
            config: Mutex::new(config),
            fallback,
        }
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> LoggingConfig {
        self.config.lock().clone()
    }

    /// Current active file path.
    pub fn path(&self) -> PathBuf {
        self.config.lock().log_file_path.clone()
    }

    /// Whether backend diagnostics at `level` should be recorded.
    pub fn is_level_enabled(&self, level: &str) -> bool {
        self.config.lock().is_level_enabled(level)
    }

    /// Replace the configuration. Waits for any in-flight write.
    pub fn update_config(&self, config: LoggingConfig) {
        let mut current = self.config.lock();
        if current.log_file_path != config.log_file_path {
            ensure_parent_dir(&config.log_file_path, self.fallback.as_ref());
        }
        *current = config;
    }

    /// Change the rotation threshold.
    pub fn setup_rotation(&self, max_size_mb: u64) {
        self.config.lock().max_file_size_mb = max_size_mb;
    }

    /// Write one entry. Never fails outward; problems go to the fallback.
    pub fn write_entry(&self, entry: &LogEntry) {
        // Already reported to the fallback inside write_batch.
        let _ = self.write_batch(std::slice::from_ref(entry));
    }

    /// Write a batch: format all, append all, sync once, rotate once.
    ///
    /// A formatting failure aborts before any byte is appended. An I/O
    /// failure mid-append may leave a prefix of the batch in the file; it is
    /// always reported, never silently dropped.
    ///
    /// Blocks on filesystem calls; async callers should use a blocking pool.
    pub fn write_batch(&self, entries: &[LogEntry]) -> Result<usize, WriteError> {
        if entries.is_empty() {
            return Ok(0);
        }

        let config = self.config.lock();

        let mut lines = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match format_entry(entry, &config.format_config) {
                Ok(line) => lines.push(line),
                Err(source) => {
                    self.fallback.report(&format!(
                        "Failed to format batch entry {} of {}: {}",
                        index,
                        entries.len(),
                        source
                    ));
                    return Err(WriteError::Format { index, source });
                }
            }
        }

        let path = &config.log_file_path;
        if let Err(e) = append_lines(path, &lines, config.flush_immediately) {
            self.fallback.report(&format!(
                "Failed to write {} entries to log file {}: {}",
                lines.len(),
                path.display(),
                e
            ));
            return Err(WriteError::Io(e));
        }

        let policy = RotationPolicy::new(config.max_file_size_bytes(), config.rotation_count);
        if let Err(e) = policy.maybe_rotate(path) {
            self.fallback.report(&format!(
                "Failed to rotate log file {}: {}",
                path.display(),
                e
            ));
            return Err(WriteError::Rotate(e));
        }

        Ok(entries.len())
    }
}

/// Append each line plus `\n` in a single write, then optionally fsync.
fn append_lines(path: &Path, lines: &[String], sync: bool) -> io::Result<()> {
    let mut buf = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        buf.push_str(line);
        buf.push('\n');
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(buf.as_bytes())?;
    if sync {
        file.flush()?;
        file.sync_all()?;
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path, fallback: &dyn Fallback) {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    if let Err(e) = fs::create_dir_all(parent) {
        fallback.report(&format!(
            "Failed to create log directory {}: {}",
            parent.display(),
            e
        ));
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
