//! Query request and result types.
//!
//! Defines the structures exchanged between the tool surface and the
//! database backends.

use crate::error::{AidpError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default client-side row cap applied when a request does not set one.
pub const DEFAULT_MAX_ROWS: usize = 1000;

/// A single query to run against AIDP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// SQL to run against AIDP (Spark SQL / SQL-92).
    pub sql: String,

    /// Optional catalog name, selected with `USE CATALOG` before the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Optional schema (database) name, selected with `USE` before the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Maximum number of rows to return, applied client-side.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

impl QueryRequest {
    /// Creates a request for the given SQL with the default row cap.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            catalog: None,
            schema: None,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    /// Sets the catalog to select before running the query.
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Sets the schema to select before running the query.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the client-side row cap.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Checks the request invariants.
    ///
    /// The SQL must be non-empty and the row cap positive. Runs before any
    /// connection attempt.
    pub fn validate(&self) -> Result<()> {
        if self.sql.trim().is_empty() {
            return Err(AidpError::config("SQL must not be empty"));
        }
        if self.max_rows == 0 {
            return Err(AidpError::config("max_rows must be positive"));
        }
        Ok(())
    }

    /// Returns the catalog/schema selection statements, in execution order.
    ///
    /// Spark accepts `USE CATALOG` and `USE` as separate statements; the
    /// catalog must be selected first.
    pub fn preamble(&self) -> Vec<String> {
        let mut statements = Vec::new();
        if let Some(catalog) = &self.catalog {
            statements.push(format!("USE CATALOG `{catalog}`"));
        }
        if let Some(schema) = &self.schema {
            statements.push(format!("USE `{schema}`"));
        }
        statements
    }
}

/// A result row as a JSON object mapping column name to value.
///
/// `serde_json` is built with `preserve_order`, so records keep the
/// server-reported column order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Represents the result of executing a SQL query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResult {
    /// Column names from the result descriptor, empty if the statement
    /// returned no result set.
    pub columns: Vec<String>,

    /// Rows in server-returned order, capped by the request's `max_rows`.
    pub rows: Vec<Record>,

    /// Number of rows actually fetched; always equals `rows.len()`.
    pub rowcount: usize,
}

impl QueryResult {
    /// Creates an empty result, as produced by statements without a
    /// result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a result from column names and positional rows.
    ///
    /// Each row is converted into a record by pairing column names with
    /// values positionally.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let rows: Vec<Record> = rows
            .into_iter()
            .map(|row| record_from_row(&columns, row))
            .collect();
        let rowcount = rows.len();
        Self {
            columns,
            rows,
            rowcount,
        }
    }
}

/// Converts a positional row into a record by zipping it with the column
/// names.
pub fn record_from_row(columns: &[String], row: Vec<Value>) -> Record {
    columns
        .iter()
        .zip(row)
        .map(|(name, value)| (name.clone(), value.into_json()))
        .collect()
}

/// Represents a single value fetched from the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Converts the value into its JSON representation.
    ///
    /// Binary data is encoded as standard base64; non-finite floats have no
    /// JSON representation and become null.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Bytes(b) => serde_json::Value::String(BASE64.encode(b)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

// Conversion implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}
