// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Renders a `LogEntry` into one line of the unified log.
//!
//! Field order is fixed:
//!   `[timestamp] [LEVEL] [SOURCE] [COMPONENT] message {"context":...}`
//! followed, when present, by a newline and the raw stack trace.
//! No trailing newline; the writer adds the line separator.

use chrono::{DateTime, Local};
use thiserror::Error;
use unilog_core::{LogEntry, LogFormatConfig, TimestampFormat};

/// Appended to messages cut at `max_message_length`.
pub const TRUNCATION_MARKER: &str = "...";

const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A valid entry that could not be rendered.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("context value at `{path}` is not a finite number")]
    NonFiniteNumber { path: String },
    #[error("context serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Format one entry. Pure: the same entry and config always give the same line.
pub fn format_entry(entry: &LogEntry, config: &LogFormatConfig) -> Result<String, FormatError> {
    let mut fields: Vec<String> = Vec::with_capacity(6);

    if config.include_timestamp {
        fields.push(bracket(&render_timestamp(
            &entry.timestamp,
            config.timestamp_format,
        )));
    }
    fields.push(bracket(entry.level.as_upper()));
    if config.include_source {
        fields.push(bracket(entry.source.as_upper()));
    }
    if let Some(component) = &entry.component {
        fields.push(bracket(&component.to_uppercase()));
    }
    fields.push(truncate_message(&entry.message, config.max_message_length));

    if config.include_context {
        if let Some(context) = entry.context.as_ref().filter(|c| !c.is_empty()) {
            if let Some(path) = context.find_non_finite() {
                return Err(FormatError::NonFiniteNumber { path });
            }
            fields.push(serde_json::to_string(context)?);
        }
    }

    let mut line = fields.join(" ");
    if let Some(stack_trace) = &entry.stack_trace {
        line.push('\n');
        line.push_str(stack_trace);
    }
    Ok(line)
}

fn bracket(field: &str) -> String {
    format!("[{}]", field)
}

/// Convert the caller's timestamp per `format`.
///
/// Anything that does not parse as RFC 3339 is returned unchanged.
pub fn render_timestamp(timestamp: &str, format: TimestampFormat) -> String {
    let parse = || DateTime::parse_from_rfc3339(timestamp).ok();
    match format {
        TimestampFormat::Iso => timestamp.to_string(),
        TimestampFormat::Local => parse()
            .map(|t| {
                t.with_timezone(&Local)
                    .format(LOCAL_TIMESTAMP_FORMAT)
                    .to_string()
            })
            .unwrap_or_else(|| timestamp.to_string()),
        TimestampFormat::Unix => parse()
            .map(|t| t.timestamp().to_string())
            .unwrap_or_else(|| timestamp.to_string()),
    }
}

/// Cut `message` to `max_len` characters (not bytes) plus the marker.
pub fn truncate_message(message: &str, max_len: Option<usize>) -> String {
    match max_len {
        Some(max) if message.chars().count() > max => {
            let mut cut: String = message.chars().take(max).collect();
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
        _ => message.to_string(),
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
