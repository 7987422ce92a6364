// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Size-triggered rotation of the active log file.
//!
//! The chain is the active file plus backups `.1` (newest) through
//! `.keep` (oldest). Backups take the active path with its extension
//! replaced by the backup number: `logs/unified.log` rotates to
//! `logs/unified.1`, `logs/unified.2`, ...

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// When to rotate and how many backups to retain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the active file is strictly larger than this
    pub max_bytes: u64,
    /// Backups retained; 0 discards the oversized file outright
    pub keep: u32,
}

impl RotationPolicy {
    pub fn new(max_bytes: u64, keep: u32) -> Self {
        Self { max_bytes, keep }
    }

    /// Rotate `path` if it has grown past `max_bytes`.
    ///
    /// Returns whether a rotation happened. Must be called after the append
    /// that may have overflowed, so the overflowing record stays in the
    /// rotated file. The caller holds the writer lock for the duration.
    pub fn maybe_rotate(&self, path: &Path) -> io::Result<bool> {
        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if size <= self.max_bytes {
            return Ok(false);
        }

        self.shift(path)?;
        tracing::info!(
            path = %path.display(),
            size,
            keep = self.keep,
            "rotated log file"
        );
        Ok(true)
    }

    fn shift(&self, path: &Path) -> io::Result<()> {
        if self.keep == 0 {
            return remove_if_exists(path);
        }

        remove_if_exists(&backup_path(path, self.keep))?;
        for i in (1..self.keep).rev() {
            let from = backup_path(path, i);
            if from.exists() {
                fs::rename(&from, backup_path(path, i + 1))?;
            }
        }
        fs::rename(path, backup_path(path, 1))
    }
}

/// Path of backup number `n` for the active file at `path`.
pub fn backup_path(path: &Path, n: u32) -> PathBuf {
    path.with_extension(n.to_string())
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "rotate_tests.rs"]
mod tests;
