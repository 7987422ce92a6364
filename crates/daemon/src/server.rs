// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener setup and the serve loop.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use unilog_core::LoggingConfig;
use unilog_writer::LogWriter;

use crate::api::router;
use crate::error::DaemonError;

/// Resolve `api_host:api_port` into a socket address.
///
/// `localhost` is accepted as an alias for the IPv4 loopback.
pub fn listen_addr(config: &LoggingConfig) -> Result<SocketAddr, DaemonError> {
    let host = config.api_host.trim();
    let ip: IpAddr = match host {
        "localhost" => IpAddr::from([127, 0, 0, 1]),
        _ => host
            .parse()
            .map_err(|_| DaemonError::BadAddress(config.api_host.clone()))?,
    };
    Ok(SocketAddr::new(ip, config.api_port))
}

/// Bind the HTTP listener.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, DaemonError> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| DaemonError::BindFailed(addr, e))
}

/// Serve the API until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    writer: Arc<LogWriter>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DaemonError> {
    let local = listener.local_addr()?;
    info!("Listening on http://{}", local);
    axum::serve(listener, router(writer))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
