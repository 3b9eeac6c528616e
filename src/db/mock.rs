//! Mock query backends for testing.
//!
//! Provides in-memory implementations for tests and offline runs. The mock
//! records every statement it is handed, so tests can assert preamble
//! ordering and the absence of execution.

use super::{DatabaseClient, QueryRequest, QueryResult, Value};
use crate::error::{AidpError, Result};
use std::sync::Mutex;

/// A mock query backend that returns predefined results.
pub struct MockDatabaseClient {
    canned: Option<(Vec<String>, Vec<Vec<Value>>)>,
    fail_on: Option<String>,
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a mock that echoes the SQL back in a single-row result.
    pub fn new() -> Self {
        Self {
            canned: None,
            fail_on: None,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that serves the given columns and rows.
    #[allow(dead_code)]
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            canned: Some((columns, rows)),
            fail_on: None,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Makes the mock fail on the first statement containing `marker`,
    /// without executing anything after it.
    #[allow(dead_code)]
    pub fn fail_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_on = Some(marker.into());
        self
    }

    /// Returns every statement handed to the mock, in execution order.
    #[allow(dead_code)]
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, statement: &str) {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(statement.to_string());
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseClient for MockDatabaseClient {
    fn execute(&self, request: &QueryRequest) -> Result<QueryResult> {
        let mut statements = request.preamble();
        statements.push(request.sql.clone());

        for statement in &statements {
            self.record(statement);
            if let Some(marker) = &self.fail_on {
                if statement.contains(marker.as_str()) {
                    return Err(AidpError::statement(format!(
                        "mock failure on: {statement}"
                    )));
                }
            }
        }

        match &self.canned {
            Some((columns, rows)) => {
                let capped: Vec<Vec<Value>> =
                    rows.iter().take(request.max_rows).cloned().collect();
                Ok(QueryResult::from_rows(columns.clone(), capped))
            }
            None => Ok(QueryResult::from_rows(
                vec!["result".to_string()],
                vec![vec![Value::String(format!(
                    "Mock result for: {}",
                    request.sql
                ))]],
            )),
        }
    }
}

/// A mock query backend that fails every call with a statement error.
#[allow(dead_code)]
pub struct FailingDatabaseClient {
    message: String,
}

#[allow(dead_code)]
impl FailingDatabaseClient {
    /// Creates a failing mock with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl DatabaseClient for FailingDatabaseClient {
    fn execute(&self, _request: &QueryRequest) -> Result<QueryResult> {
        Err(AidpError::statement(self.message.clone()))
    }
}
