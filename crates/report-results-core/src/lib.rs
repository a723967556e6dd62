//! Core systems for report-results.
//!
//! This crate turns a JSON document of unknown shape into a flat, ordered map
//! from paths to rendered scalar values:
//!
//! - **Flattening**: every leaf (string, number, boolean, null) becomes one
//!   entry keyed by the slash-delimited path leading to it
//! - **Paths**: paths are JSON Pointers, so any entry can be resolved back into
//!   the source document with [`serde_json::Value::pointer`]
//! - **GraphQL errors**: helpers to find `/errors/<N>/message` entries in a
//!   flattened response envelope
//!
//! # Example
//!
//! ```
//! use report_results_core::FlatMap;
//! use serde_json::json;
//!
//! let doc = json!({"a": {"b": [1, null, "x"]}});
//! let flat = FlatMap::from_value(&doc);
//!
//! assert_eq!(flat.get("/a/b/0"), Some("1"));
//! assert_eq!(flat.get("/a/b/1"), Some("null"));
//! assert_eq!(flat.get("/a/b/2"), Some("x"));
//! ```
//!
//! # Known limitations
//!
//! Empty objects and empty arrays have no leaves and therefore contribute no
//! entries. A flattened document cannot tell `{"a": {}}` apart from `{}`.

mod error;
pub mod flatten;
pub mod logging;
pub mod path;

pub use error::{FlattenError, Result};
pub use flatten::{FlatMap, NULL_LITERAL, flatten, parse_document, render_scalar};
pub use path::{error_message_index, escape_segment, join_path, split_path, unescape_segment};
