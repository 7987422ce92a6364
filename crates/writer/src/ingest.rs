// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ingestion adapter: validate a batch, then hand it to the writer once.
//!
//! Two kinds of bad input are kept apart. Schema failures (unknown level or
//! source, wrong JSON types, unparseable body) are caught while parsing,
//! before any `LogEntry` exists. Structural failures (empty batch, empty
//! timestamp or message) are caught on parsed entries. Either way nothing
//! from the batch is written.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unilog_core::LogEntry;

use crate::writer::{LogWriter, WriteError};

/// Wire body of an ingestion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogBatch {
    pub entries: Vec<LogEntry>,
}

/// Required entry field that was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Timestamp,
    Message,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            RequiredField::Timestamp => "timestamp",
            RequiredField::Message => "message",
        }
    }
}

/// Coarse grouping of ingestion failures, used for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Structural,
    Schema,
    Formatting,
    Io,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No log entries provided")]
    EmptyBatch,
    #[error("Entry {index}: {} is required", field.as_str())]
    MissingField { index: usize, field: RequiredField },
    #[error("Validation error: {0}")]
    Schema(String),
    #[error("Entry {index} could not be formatted")]
    Format { index: usize },
    /// I/O detail goes only to the fallback stream
    #[error("Internal error while writing logs")]
    Internal,
}

impl IngestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IngestError::EmptyBatch | IngestError::MissingField { .. } => {
                ErrorCategory::Structural
            }
            IngestError::Schema(_) => ErrorCategory::Schema,
            IngestError::Format { .. } => ErrorCategory::Formatting,
            IngestError::Internal => ErrorCategory::Io,
        }
    }
}

impl From<WriteError> for IngestError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Format { index, .. } => IngestError::Format { index },
            WriteError::Io(_) | WriteError::Rotate(_) => IngestError::Internal,
        }
    }
}

/// Parse a JSON request body into a batch.
pub fn parse_batch(body: &[u8]) -> Result<LogBatch, IngestError> {
    serde_json::from_slice(body).map_err(|e| IngestError::Schema(e.to_string()))
}

/// Structural checks on parsed entries.
pub fn validate_batch(entries: &[LogEntry]) -> Result<(), IngestError> {
    if entries.is_empty() {
        return Err(IngestError::EmptyBatch);
    }
    for (index, entry) in entries.iter().enumerate() {
        if entry.timestamp.is_empty() {
            return Err(IngestError::MissingField {
                index,
                field: RequiredField::Timestamp,
            });
        }
        if entry.message.is_empty() {
            return Err(IngestError::MissingField {
                index,
                field: RequiredField::Message,
            });
        }
    }
    Ok(())
}

/// Validate and write a batch. Returns the number of entries written.
pub fn ingest(writer: &LogWriter, entries: &[LogEntry]) -> Result<usize, IngestError> {
    validate_batch(entries)?;
    Ok(writer.write_batch(entries)?)
}

/// Parse, validate, and write a raw JSON body.
pub fn ingest_json(writer: &LogWriter, body: &[u8]) -> Result<usize, IngestError> {
    let batch = parse_batch(body)?;
    ingest(writer, &batch.entries)
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
