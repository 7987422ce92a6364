// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unified logging daemon (unilogd)
//!
//! Accepts browser-extension log batches over HTTP and appends them, along
//! with the daemon's own diagnostics, to a single rotating log file.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};
use unilog_daemon::{bind, env, listen_addr, serve, ConfigManager, UnifiedLayer};
use unilog_daemon::{DaemonError, SERVICE_NAME, VERSION};
use unilog_writer::{LogWriter, TracingFallback};

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Run,
    Version,
    Help,
    Unexpected(String),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Invocation {
    match args.next() {
        None => Invocation::Run,
        Some(arg) => match arg.as_str() {
            "--version" | "-V" | "-v" => Invocation::Version,
            "--help" | "-h" | "help" => Invocation::Help,
            _ => Invocation::Unexpected(arg),
        },
    }
}

fn print_help() {
    println!("unilogd {}", VERSION);
    println!("{} - collects browser and backend logs into one file", SERVICE_NAME);
    println!();
    println!("USAGE:");
    println!("    unilogd");
    println!();
    println!("Configuration is read from config/logging.json, or the file named");
    println!("by {}. Environment variables such as LOG_FILE_PATH,", env::CONFIG_PATH_VAR);
    println!("API_HOST and API_PORT override the file.");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before touching config or the log file
    match parse_args(std::env::args().skip(1)) {
        Invocation::Run => {}
        Invocation::Version => {
            println!("unilogd {}", VERSION);
            return Ok(());
        }
        Invocation::Help => {
            print_help();
            return Ok(());
        }
        Invocation::Unexpected(arg) => {
            eprintln!("error: unexpected argument '{arg}'");
            eprintln!("Usage: unilogd [--help | --version]");
            std::process::exit(1);
        }
    }

    let manager = ConfigManager::load(&env::config_path())?;
    let config = manager.get();

    let writer = Arc::new(LogWriter::with_fallback(
        config.clone(),
        Arc::new(TracingFallback),
    ));

    let log_guard = setup_logging(Arc::clone(&writer));

    info!(target: "startup", "Loading {} {}", SERVICE_NAME, VERSION);
    info!(
        target: "startup",
        config = %manager.path().display(),
        log_file = %config.log_file_path.display(),
        "configuration loaded"
    );

    let result = run(&config, writer).await;
    if let Err(e) = &result {
        error!(target: "startup", "Failed to start server: {}", e);
    }
    drop(log_guard);
    result.map_err(Into::into)
}

async fn run(
    config: &unilog_core::LoggingConfig,
    writer: Arc<LogWriter>,
) -> Result<(), DaemonError> {
    let addr = listen_addr(config)?;
    let listener = bind(addr).await?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
    };

    serve(listener, writer, shutdown).await
}

/// Human-readable diagnostics go to stderr; the same events are mirrored
/// into the unified log as backend entries.
fn setup_logging(writer: Arc<LogWriter>) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .with(UnifiedLayer::new(writer))
        .init();

    guard
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
