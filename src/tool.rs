//! Agent-facing tool surface for function calling.
//!
//! Exposes the `aidp_sql_query` tool: one callable that runs SQL against
//! AIDP and returns rows as JSON-safe records, in the shape agent
//! frameworks expect from a tool definition.

use crate::db::{self, DatabaseBackend, DatabaseClient, QueryRequest, QueryResult, Record};
use crate::error::{AidpError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Name under which the query tool is exposed to agent frameworks.
pub const TOOL_NAME: &str = "aidp_sql_query";

/// Tool description shown to the model.
const TOOL_DESCRIPTION: &str =
    "Run SQL against OCI AIDP (Spark) through the Simba driver and return rows as JSON-safe records.";

/// Tool definition for function calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Result shape returned to the agent framework.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    /// Result rows as objects mapping column name to value.
    pub rows: Vec<Record>,

    /// Number of rows returned; equals `rows.len()`, capped by the
    /// request's `max_rows`, not the server-side total.
    pub rowcount: usize,
}

impl From<QueryResult> for QueryOutput {
    fn from(result: QueryResult) -> Self {
        Self {
            rows: result.rows,
            rowcount: result.rowcount,
        }
    }
}

/// Interface an agent framework consumes.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as exposed to the framework.
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters(&self) -> serde_json::Value;

    /// Invokes the tool with a JSON arguments object.
    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value>;
}

/// Returns the `aidp_sql_query` tool definition.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: TOOL_DESCRIPTION.to_string(),
        parameters: parameters_schema(),
    }
}

fn parameters_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "sql": {
                "type": "string",
                "description": "SQL to run against AIDP (Spark SQL / SQL-92)."
            },
            "catalog": {
                "type": "string",
                "description": "Optional catalog name."
            },
            "schema": {
                "type": "string",
                "description": "Optional schema (database) name."
            },
            "max_rows": {
                "type": "integer",
                "description": "Max rows to return (default: 1000)."
            }
        },
        "required": ["sql"]
    })
}

/// The `aidp_sql_query` tool.
///
/// Stateless between calls: every invocation reads its configuration from
/// the environment and opens its own connection, so a single instance may
/// serve concurrent callers.
pub struct QueryTool {
    client: Box<dyn DatabaseClient>,
}

impl QueryTool {
    /// Creates the tool with the Spark driver backend.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: db::client_for(DatabaseBackend::Spark)?,
        })
    }

    /// Creates the tool with the given backend.
    ///
    /// This is primarily useful for testing.
    pub fn with_client(client: Box<dyn DatabaseClient>) -> Self {
        Self { client }
    }

    /// Runs one query synchronously.
    pub fn run(&self, request: &QueryRequest) -> Result<QueryOutput> {
        request.validate()?;
        let result = self.client.execute(request)?;
        Ok(result.into())
    }

    /// Asynchronous convenience wrapper; simply delegates to [`Self::run`].
    ///
    /// Genuinely asynchronous execution would need a blocking-task worker
    /// and is out of scope for this adapter.
    pub async fn run_async(&self, request: &QueryRequest) -> Result<QueryOutput> {
        self.run(request)
    }
}

#[async_trait]
impl Tool for QueryTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    fn parameters(&self) -> serde_json::Value {
        parameters_schema()
    }

    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value> {
        let request: QueryRequest = serde_json::from_value(args)
            .map_err(|e| AidpError::internal(format!("invalid tool arguments: {e}")))?;
        let output = self.run_async(&request).await?;
        serde_json::to_value(output).map_err(|e| AidpError::internal(e.to_string()))
    }
}
