// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Context, Level, LogEntry, Source};

/// Fixed timestamp used throughout test fixtures.
pub const TEST_TIMESTAMP: &str = "2025-01-14T10:30:00.000Z";

// ── Entry factory functions ─────────────────────────────────────────────────

pub fn frontend_entry(level: Level, message: &str) -> LogEntry {
    LogEntry::new(TEST_TIMESTAMP, level, message, Source::Frontend)
}

pub fn backend_entry(level: Level, message: &str) -> LogEntry {
    LogEntry::new(TEST_TIMESTAMP, level, message, Source::Backend)
}

pub fn info_entry(message: &str) -> LogEntry {
    frontend_entry(Level::Info, message)
}

/// Entry whose context cannot be serialized to JSON.
pub fn unformattable_entry(message: &str) -> LogEntry {
    let mut context = Context::new();
    context.insert("ratio", f64::NAN);
    info_entry(message).with_context(context)
}
