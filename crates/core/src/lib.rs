// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! unilog-core: value types shared by the unified log writer and daemon

pub mod config;
pub mod context;
pub mod entry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ConfigError, LogFormatConfig, LoggingConfig, TimestampFormat, LOG_LEVELS};
pub use context::{Context, ContextValue};
pub use entry::{Level, LogEntry, Source, UnknownVariant};
