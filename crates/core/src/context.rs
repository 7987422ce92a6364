// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured context attached to a log entry.
//!
//! Keys keep their insertion order so the compact JSON rendering is the
//! same every time the same context is built.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single context value.
///
/// Deserializes from any JSON value. Integers that fit in `i64` stay
/// integers; everything else numeric becomes `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ContextValue>),
    Map(IndexMap<String, ContextValue>),
}

impl ContextValue {
    /// Locate the first NaN or infinite float, returning its dotted path
    /// relative to this value (empty when the value itself is non-finite).
    pub fn find_non_finite(&self) -> Option<String> {
        match self {
            ContextValue::Float(f) if !f.is_finite() => Some(String::new()),
            ContextValue::List(items) => items.iter().enumerate().find_map(|(i, v)| {
                v.find_non_finite().map(|rest| join_path(&i.to_string(), &rest))
            }),
            ContextValue::Map(map) => map
                .iter()
                .find_map(|(k, v)| v.find_non_finite().map(|rest| join_path(k, &rest))),
            _ => None,
        }
    }
}

fn join_path(head: &str, rest: &str) -> String {
    if rest.is_empty() {
        head.to_string()
    } else {
        format!("{}.{}", head, rest)
    }
}

impl From<&str> for ContextValue {
    fn from(v: &str) -> Self {
        ContextValue::String(v.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(v: String) -> Self {
        ContextValue::String(v)
    }
}

impl From<bool> for ContextValue {
    fn from(v: bool) -> Self {
        ContextValue::Bool(v)
    }
}

impl From<i64> for ContextValue {
    fn from(v: i64) -> Self {
        ContextValue::Int(v)
    }
}

impl From<u32> for ContextValue {
    fn from(v: u32) -> Self {
        ContextValue::Int(i64::from(v))
    }
}

impl From<u64> for ContextValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => ContextValue::Int(i),
            Err(_) => ContextValue::Float(v as f64),
        }
    }
}

impl From<f64> for ContextValue {
    fn from(v: f64) -> Self {
        ContextValue::Float(v)
    }
}

impl From<Context> for ContextValue {
    fn from(v: Context) -> Self {
        ContextValue::Map(v.0)
    }
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(v: Vec<T>) -> Self {
        ContextValue::List(v.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered map of context attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(IndexMap<String, ContextValue>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContextValue)> {
        self.0.iter()
    }

    /// Dotted path to the first non-finite float, if any.
    pub fn find_non_finite(&self) -> Option<String> {
        self.0
            .iter()
            .find_map(|(k, v)| v.find_non_finite().map(|rest| join_path(k, &rest)))
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
