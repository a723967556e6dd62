//! JSON flattening.
//!
//! [`flatten`] walks a [`serde_json::Value`] depth-first and records every
//! leaf in a [`FlatMap`] under the path leading to it:
//!
//! | node      | action                                             |
//! |-----------|----------------------------------------------------|
//! | object    | visit each member at `prefix + "/" + key`          |
//! | array     | visit each element at `prefix + "/" + index`       |
//! | null      | record the literal [`NULL_LITERAL`]                |
//! | scalar    | record [`render_scalar`] of the value              |
//!
//! The walk uses an explicit work-stack, so nesting depth is bounded only by
//! available memory.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::logging::targets;
use crate::path::{error_message_index, escape_segment};

/// Text recorded for a JSON `null` leaf.
pub const NULL_LITERAL: &str = "null";

/// Render a scalar JSON value as text.
///
/// Strings are returned verbatim without quotes, numbers in their canonical
/// JSON form and booleans as `true` / `false`. Containers are rendered as
/// compact JSON, although [`flatten`] never passes one here.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => NULL_LITERAL.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Parse `text` as a single JSON document.
///
/// The parser's recursion limit is lifted and its stack grows on demand, so
/// any valid document parses regardless of how deeply it nests.
pub fn parse_document(text: &str) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Flatten `value` into `target`, prefixing every path with `prefix`.
///
/// Use `""` as the prefix for a whole document. A document that is a bare
/// scalar flattens to the single path `""`. Empty objects and arrays produce
/// no entries.
///
/// Object keys go through [`escape_segment`], so a key holding `~` or `/`
/// appears as `~0` or `~1` rather than verbatim: `{"a/b": 1}` flattens to
/// `/a~1b`, not `/a/b`. Keys without those characters are used as-is.
///
/// A path already present in `target` has its value replaced and keeps its
/// original position.
pub fn flatten(value: &Value, target: &mut FlatMap, prefix: &str) {
    let before = target.len();
    let mut stack: Vec<(&Value, String)> = vec![(value, prefix.to_string())];

    while let Some((node, path)) = stack.pop() {
        match node {
            Value::Object(members) => {
                // Reversed so members pop off the stack in document order.
                for (key, child) in members.iter().rev() {
                    let mut child_path = String::with_capacity(path.len() + key.len() + 1);
                    child_path.push_str(&path);
                    child_path.push('/');
                    child_path.push_str(&escape_segment(key));
                    stack.push((child, child_path));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    stack.push((child, format!("{path}/{index}")));
                }
            }
            Value::Null => {
                target.insert(path, NULL_LITERAL);
            }
            scalar => {
                target.insert(path, render_scalar(scalar));
            }
        }
    }

    tracing::trace!(
        target: targets::FLATTEN,
        prefix,
        added = target.len() - before,
        "Flattened JSON value"
    );
}

/// An ordered map from path to rendered leaf value.
///
/// Iteration yields entries in the order they were written, which for a
/// single [`flatten`] pass is depth-first document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatMap {
    entries: IndexMap<String, String>,
}

impl FlatMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a whole document into a fresh map.
    pub fn from_value(value: &Value) -> Self {
        let mut map = Self::new();
        flatten(value, &mut map, "");
        map
    }

    /// Parse `text` as JSON and flatten it.
    ///
    /// Fails only if `text` is not a JSON document. See [`parse_document`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value = parse_document(text)?;
        Ok(Self::from_value(&value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value recorded at `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Check if a leaf was recorded at `path`.
    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Record `value` at `path`.
    ///
    /// Returns the previous value if the path was already present.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(path.into(), value.into())
    }

    /// Iterate over `(path, value)` pairs in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> + ExactSizeIterator {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// Iterate over the entries whose path starts with `prefix`.
    ///
    /// `prefix` is matched on whole segments, so `/data/report` does not
    /// match `/data/reports/0`.
    pub fn subtree<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter().filter(move |(path, _)| {
            prefix.is_empty()
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// The message of the first GraphQL error, stored at `/errors/0/message`.
    pub fn first_error_message(&self) -> Option<&str> {
        self.get("/errors/0/message")
    }

    /// Messages of every GraphQL error, ordered by error index.
    ///
    /// Collects every `/errors/<N>/message` entry, not only the first.
    pub fn error_messages(&self) -> Vec<&str> {
        let mut found: Vec<(usize, &str)> = self
            .iter()
            .filter_map(|(path, value)| error_message_index(path).map(|i| (i, value)))
            .collect();
        found.sort_by_key(|(index, _)| *index);
        found.into_iter().map(|(_, message)| message).collect()
    }

    /// Check if any `/errors/<N>/message` entry is present.
    pub fn has_graphql_errors(&self) -> bool {
        self.paths().any(|path| error_message_index(path).is_some())
    }

    /// Consume the map, returning the underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.entries
    }
}

impl fmt::Display for FlatMap {
    /// One `path: value` line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, value) in self.iter() {
            writeln!(f, "{path}: {value}")?;
        }
        Ok(())
    }
}

impl From<&Value> for FlatMap {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FlatMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
