// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the daemon

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use unilog_core::ConfigError;

/// Errors that can occur while configuring or running the daemon
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid config update: {0}")]
    ConfigUpdate(#[source] serde_json::Error),

    #[error("failed to write config to {0}: {1}")]
    SaveFailed(PathBuf, #[source] std::io::Error),

    #[error("invalid listen address {0}")]
    BadAddress(String),

    #[error("failed to bind {0}: {1}")]
    BindFailed(SocketAddr, #[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
