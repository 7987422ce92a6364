// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Unified log writer: formatting, append, rotation, and batch ingestion

pub mod fallback;
pub mod format;
pub mod ingest;
pub mod rotate;
mod writer;

/// Tracing target prefix for everything this crate emits. Forwarding these
/// events back into the unified file would re-enter the writer.
pub const WRITER_TARGET_PREFIX: &str = "unilog_writer";

#[cfg(any(test, feature = "test-support"))]
pub use fallback::RecordingFallback;
pub use fallback::{Fallback, StderrFallback, TracingFallback, FALLBACK_TARGET};
pub use format::{format_entry, FormatError};
pub use ingest::{
    ingest, ingest_json, parse_batch, validate_batch, ErrorCategory, IngestError, LogBatch,
    RequiredField,
};
pub use rotate::{backup_path, RotationPolicy};
pub use writer::{LogWriter, WriteError};
