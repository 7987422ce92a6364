// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log entry value type and its closed enums.
//!
//! A `LogEntry` is what the frontend posts and what the backend shim builds
//! from its own diagnostics. Entries are write-once: once appended to the
//! unified file they are never mutated or removed individually.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::{Context, ContextValue};

/// A value did not match any member of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`, expected one of: {expected}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Severity of a log entry.
///
/// Parsed case-insensitively, serialized lowercase, rendered uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// Uppercase label used in the formatted line.
    pub fn as_upper(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl FromStr for Level {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(UnknownVariant {
                kind: "level",
                value: s.to_string(),
                expected: "debug, info, warn, error",
            }),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, UnknownVariant> {
        value.parse()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Source {
    /// Browser extension
    Frontend,
    /// This process
    Backend,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Frontend => "frontend",
            Source::Backend => "backend",
        }
    }

    pub fn as_upper(self) -> &'static str {
        match self {
            Source::Frontend => "FRONTEND",
            Source::Backend => "BACKEND",
        }
    }
}

impl FromStr for Source {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frontend" => Ok(Source::Frontend),
            "backend" => Ok(Source::Backend),
            _ => Err(UnknownVariant {
                kind: "source",
                value: s.to_string(),
                expected: "frontend, backend",
            }),
        }
    }
}

impl TryFrom<String> for Source {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, UnknownVariant> {
        value.parse()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured log record.
///
/// Wire shape (camelCase only for `stackTrace`):
/// `{"timestamp", "level", "message", "source", "component"?, "context"?, "stackTrace"?}`
///
/// `timestamp` and `message` deserialize empty when absent; rejecting them is
/// the ingestion adapter's structural check, not a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: String,
    pub level: Level,
    #[serde(default)]
    pub message: String,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(
        default,
        rename = "stackTrace",
        skip_serializing_if = "Option::is_none"
    )]
    pub stack_trace: Option<String>,
}

impl LogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        source: Source,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level,
            message: message.into(),
            source,
            component: None,
            context: None,
            stack_trace: None,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Add a single context attribute, creating the context if needed.
    pub fn with_context_value(
        mut self,
        key: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Self {
        self.context
            .get_or_insert_with(Context::new)
            .insert(key, value);
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
