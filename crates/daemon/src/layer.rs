// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing layer that funnels this process's own diagnostics into the
//! unified log as `backend` entries.
//!
//! Each event becomes one `LogEntry`: the target is the component, the
//! `message` field is the message, and every other field lands in the
//! context next to `module`, `file` and `line`. A field named `stack_trace`
//! becomes the entry's stack trace.
//!
//! The write happens synchronously on the emitting thread, fsync included
//! when `flush_immediately` is set. Per-batch events are emitted from the
//! blocking pool (see `api::receive_logs`); only startup, listen and
//! shutdown notices come from tokio workers.

use std::fmt;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level as TracingLevel, Subscriber};
use tracing_subscriber::layer::Context as LayerContext;
use tracing_subscriber::Layer;
use unilog_core::{Context, ContextValue, Level, LogEntry, Source};
use unilog_writer::{LogWriter, WRITER_TARGET_PREFIX};

const STACK_TRACE_FIELD: &str = "stack_trace";

/// Forwards tracing events into a [`LogWriter`].
pub struct UnifiedLayer {
    writer: Arc<LogWriter>,
}

impl UnifiedLayer {
    pub fn new(writer: Arc<LogWriter>) -> Self {
        Self { writer }
    }
}

impl<S: Subscriber> Layer<S> for UnifiedLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let meta = event.metadata();
        // The writer's own diagnostics (rotation, fallback) would re-enter it
        if meta.target().starts_with(WRITER_TARGET_PREFIX) {
            return;
        }
        if !self.writer.is_level_enabled(config_level_name(meta.level())) {
            return;
        }

        let mut visitor = EntryVisitor::default();
        if let Some(module) = meta.module_path() {
            visitor.context.insert("module", module);
        }
        if let Some(file) = meta.file() {
            visitor.context.insert("file", file);
        }
        if let Some(line) = meta.line() {
            visitor.context.insert("line", line);
        }
        event.record(&mut visitor);

        let message = visitor.message.unwrap_or_else(|| meta.name().to_string());
        let mut entry = LogEntry::new(
            utc_timestamp(),
            entry_level(meta.level()),
            message,
            Source::Backend,
        )
        .with_component(meta.target())
        .with_context(visitor.context);
        if let Some(stack_trace) = visitor.stack_trace {
            entry = entry.with_stack_trace(stack_trace);
        }

        self.writer.write_entry(&entry);
    }
}

/// Current time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Map a tracing level onto the four entry levels.
pub fn entry_level(level: &TracingLevel) -> Level {
    match *level {
        TracingLevel::TRACE | TracingLevel::DEBUG => Level::Debug,
        TracingLevel::INFO => Level::Info,
        TracingLevel::WARN => Level::Warn,
        TracingLevel::ERROR => Level::Error,
    }
}

/// Level name as understood by `LoggingConfig::is_level_enabled`.
fn config_level_name(level: &TracingLevel) -> &'static str {
    match *level {
        TracingLevel::TRACE => "TRACE",
        TracingLevel::DEBUG => "DEBUG",
        TracingLevel::INFO => "INFO",
        TracingLevel::WARN => "WARNING",
        TracingLevel::ERROR => "ERROR",
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: Option<String>,
    stack_trace: Option<String>,
    context: Context,
}

impl EntryVisitor {
    fn record_value(&mut self, field: &Field, value: ContextValue) {
        self.context.insert(field.name(), value);
    }
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            STACK_TRACE_FIELD => self.stack_trace = Some(value.to_string()),
            _ => self.record_value(field, value.into()),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.into());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record_value(field, value.to_string().into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        match field.name() {
            "message" => self.message = Some(rendered),
            STACK_TRACE_FIELD => self.stack_trace = Some(rendered),
            _ => self.record_value(field, rendered.into()),
        }
    }
}

#[cfg(test)]
#[path = "layer_tests.rs"]
mod tests;
