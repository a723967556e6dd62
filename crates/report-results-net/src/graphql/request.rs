//! GraphQL request types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Name of the variable that carries the report number.
pub const REPORT_NUMBER_VARIABLE: &str = "ReportNumber";

/// A GraphQL request payload.
///
/// Serializes to `{ "query": ..., "variables": { ... } }`, plus
/// `"operationName"` when one is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL query document.
    pub query: String,

    /// Variables for the query.
    #[serde(default)]
    pub variables: Map<String, Value>,

    /// Optional operation name (for documents with multiple operations).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "operationName"
    )]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    /// Create a new request from a raw query document.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = GraphQLRequest::new(r#"
    ///     query GetReport($ReportNumber: String!) {
    ///         report(number: $ReportNumber) { id }
    ///     }
    /// "#)
    /// .variable("ReportNumber", "1206489210");
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
            operation_name: None,
        }
    }

    /// Create the report lookup payload:
    /// `{ "query": <query>, "variables": { "ReportNumber": <report_number> } }`.
    pub fn report(query: impl Into<String>, report_number: impl Into<String>) -> Self {
        Self::new(query).variable(REPORT_NUMBER_VARIABLE, Value::String(report_number.into()))
    }

    /// Set a variable value.
    ///
    /// Values that cannot be represented as JSON are skipped.
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.variables.insert(name.into(), value);
        }
        self
    }

    /// Set the operation name.
    ///
    /// Required when the query document contains multiple operations.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// The report number variable, if set to a string.
    pub fn report_number(&self) -> Option<&str> {
        self.variables.get(REPORT_NUMBER_VARIABLE)?.as_str()
    }

    /// Serialize to compact JSON for the wire.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON for display.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
