//! Spark driver-bridge backend.
//!
//! Implements `DatabaseClient` over the ODBC driver manager, the call-level
//! interface the Simba Spark driver ships for. The driver does all the heavy
//! lifting (planning, transport, OCI authentication); this backend only
//! configures the connection, runs the statements, and drains the rows.

use crate::config::ConnectionConfig;
use crate::db::{DatabaseClient, QueryRequest, QueryResult, Value};
use crate::error::{AidpError, Result};
use odbc_api::{
    Bit, Connection, ConnectionOptions, Cursor, CursorRow, DataType, Environment, Nullable,
    ResultSetMetadata,
};
use tracing::debug;

/// Query backend speaking to AIDP through the Spark driver.
///
/// Holds only the driver-manager environment handle, which is thread-safe
/// and immutable; every call opens and closes its own connection, so one
/// client may serve concurrent callers.
pub struct SparkClient {
    env: Environment,
}

impl SparkClient {
    /// Creates a new client, allocating the driver-manager environment.
    pub fn new() -> Result<Self> {
        let env = Environment::new().map_err(|e| AidpError::connection(e.to_string()))?;
        Ok(Self { env })
    }

    /// Opens a connection for a single query.
    ///
    /// No username/password is supplied; authentication is handled by the
    /// OCI profile/token attributes in the connection string. The connection
    /// closes when the returned handle drops.
    fn connect(&self, config: &ConnectionConfig) -> Result<Connection<'_>> {
        let conn_str = config.effective_connection_string();
        debug!("opening driver connection");
        self.env
            .connect_with_connection_string(&conn_str, ConnectionOptions::default())
            .map_err(|e| AidpError::connection(e.to_string()))
    }
}

impl DatabaseClient for SparkClient {
    fn execute(&self, request: &QueryRequest) -> Result<QueryResult> {
        // Read fresh on every call, per the AIDP contract; a missing
        // variable fails here, before any connection attempt.
        let config = ConnectionConfig::from_env()?;
        let conn = self.connect(&config)?;

        // A failing preamble statement aborts the call; the main query is
        // never attempted.
        for statement in request.preamble() {
            debug!(statement = %statement, "running preamble statement");
            let _ = conn
                .execute(&statement, (), None)
                .map_err(|e| AidpError::statement(e.to_string()))?;
        }

        debug!(sql = %request.sql, max_rows = request.max_rows, "executing query");
        let cursor = conn
            .execute(&request.sql, (), None)
            .map_err(|e| AidpError::statement(e.to_string()))?;

        // Statements without a result set report no columns and no rows.
        let Some(mut cursor) = cursor else {
            return Ok(QueryResult::empty());
        };

        let columns: Vec<String> = cursor
            .column_names()
            .map_err(|e| AidpError::statement(e.to_string()))?
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| AidpError::statement(e.to_string()))?;

        let kinds: Vec<ValueKind> = (1..=columns.len() as u16)
            .map(|index| cursor.col_data_type(index).map(ValueKind::from))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| AidpError::statement(e.to_string()))?;

        let mut rows: Vec<Vec<Value>> = Vec::new();
        while rows.len() < request.max_rows {
            let row = cursor
                .next_row()
                .map_err(|e| AidpError::statement(e.to_string()))?;
            let Some(mut row) = row else {
                break;
            };

            let mut values = Vec::with_capacity(columns.len());
            for (index, kind) in kinds.iter().enumerate() {
                let value = fetch_value(&mut row, (index + 1) as u16, *kind)
                    .map_err(|e| AidpError::statement(e.to_string()))?;
                values.push(value);
            }
            rows.push(values);
        }

        if rows.len() == request.max_rows {
            // Dropping the cursor below closes the statement handle and
            // discards whatever the server had left.
            debug!(max_rows = request.max_rows, "row cap reached");
        }

        Ok(QueryResult::from_rows(columns, rows))
    }
}

/// How a result column is fetched from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
    Binary,
}

impl From<DataType> for ValueKind {
    fn from(data_type: DataType) -> Self {
        match data_type {
            DataType::Bit => Self::Bool,
            DataType::TinyInt | DataType::SmallInt | DataType::Integer | DataType::BigInt => {
                Self::Int
            }
            DataType::Real
            | DataType::Double
            | DataType::Float { .. }
            | DataType::Numeric { .. }
            | DataType::Decimal { .. } => Self::Float,
            DataType::Binary { .. }
            | DataType::Varbinary { .. }
            | DataType::LongVarbinary { .. } => Self::Binary,
            // Dates, timestamps, intervals and everything else arrive as the
            // driver's text rendition.
            _ => Self::Text,
        }
    }
}

/// Fetches one cell, dispatching on the column's reported data type.
fn fetch_value(
    row: &mut CursorRow<'_>,
    column: u16,
    kind: ValueKind,
) -> std::result::Result<Value, odbc_api::Error> {
    match kind {
        ValueKind::Bool => {
            let mut buf = Nullable::<Bit>::null();
            row.get_data(column, &mut buf)?;
            Ok(buf
                .into_opt()
                .map(|bit| Value::Bool(bit.as_bool()))
                .unwrap_or(Value::Null))
        }
        ValueKind::Int => {
            let mut buf = Nullable::<i64>::null();
            row.get_data(column, &mut buf)?;
            Ok(buf.into_opt().map(Value::Int).unwrap_or(Value::Null))
        }
        ValueKind::Float => {
            let mut buf = Nullable::<f64>::null();
            row.get_data(column, &mut buf)?;
            Ok(buf.into_opt().map(Value::Float).unwrap_or(Value::Null))
        }
        ValueKind::Text => {
            let mut buf = Vec::new();
            if row.get_text(column, &mut buf)? {
                Ok(Value::String(String::from_utf8_lossy(&buf).into_owned()))
            } else {
                Ok(Value::Null)
            }
        }
        ValueKind::Binary => {
            let mut buf = Vec::new();
            if row.get_binary(column, &mut buf)? {
                Ok(Value::Bytes(buf))
            } else {
                Ok(Value::Null)
            }
        }
    }
}
