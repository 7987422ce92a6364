// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unified logging daemon library
//!
//! Exposes the HTTP router, configuration loading and the tracing layer so
//! the binary and the integration specs share one implementation.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod api;
pub mod config;
pub mod env;
pub mod error;
pub mod layer;
pub mod server;

pub use api::{router, ApiError, SERVICE_ID, SERVICE_NAME, VERSION};
pub use config::{ConfigManager, ConfigUpdate};
pub use error::DaemonError;
pub use layer::UnifiedLayer;
pub use server::{bind, listen_addr, serve};
