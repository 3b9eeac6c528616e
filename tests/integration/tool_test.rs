//! Query tool integration tests.
//!
//! Runs the `aidp_sql_query` surface end-to-end against the mock backend.

use aidp_query::db::{FailingDatabaseClient, MockDatabaseClient, QueryRequest, Value};
use aidp_query::tool::{tool_definition, QueryTool, Tool};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_single_row_scenario() {
    let client = MockDatabaseClient::with_rows(columns(&["x"]), vec![vec![Value::Int(1)]]);
    let tool = QueryTool::with_client(Box::new(client));
    let request = QueryRequest::new("SELECT 1 AS x").with_max_rows(10);

    let output = tool.run(&request).unwrap();

    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!({"rows": [{"x": 1}], "rowcount": 1})
    );
}

#[test]
fn test_row_cap_scenario() {
    let rows = (0..5).map(|i| vec![Value::Int(i)]).collect();
    let client = MockDatabaseClient::with_rows(columns(&["n"]), rows);
    let tool = QueryTool::with_client(Box::new(client));
    let request = QueryRequest::new("SELECT * FROM t").with_max_rows(2);

    let output = tool.run(&request).unwrap();

    assert_eq!(output.rowcount, 2);
    assert_eq!(output.rows.len(), output.rowcount);
}

#[test]
fn test_cap_larger_than_result_set() {
    let rows = (0..3).map(|i| vec![Value::Int(i)]).collect();
    let client = MockDatabaseClient::with_rows(columns(&["n"]), rows);
    let tool = QueryTool::with_client(Box::new(client));
    let request = QueryRequest::new("SELECT * FROM t").with_max_rows(100);

    let output = tool.run(&request).unwrap();

    assert_eq!(output.rowcount, 3);
}

#[test]
fn test_catalog_and_schema_selected_before_query() {
    let client = Arc::new(MockDatabaseClient::new());
    let tool = QueryTool::with_client(Box::new(client.clone()));
    let request = QueryRequest::new("SELECT * FROM orders")
        .with_catalog("lakehouse")
        .with_schema("sales");

    tool.run(&request).unwrap();

    assert_eq!(
        client.executed_statements(),
        vec![
            "USE CATALOG `lakehouse`",
            "USE `sales`",
            "SELECT * FROM orders"
        ]
    );
}

#[test]
fn test_failed_preamble_aborts_main_query() {
    let client = Arc::new(MockDatabaseClient::new().fail_on("USE CATALOG"));
    let tool = QueryTool::with_client(Box::new(client.clone()));
    let request = QueryRequest::new("SELECT 1").with_catalog("missing_catalog");

    let result = tool.run(&request);

    assert!(result.is_err());
    assert_eq!(
        client.executed_statements(),
        vec!["USE CATALOG `missing_catalog`"]
    );
}

#[test]
fn test_server_error_returns_no_partial_rows() {
    let tool = QueryTool::with_client(Box::new(FailingDatabaseClient::new(
        "org.apache.spark.sql.AnalysisException: Table or view not found: t",
    )));
    let request = QueryRequest::new("SELECT * FROM t");

    let err = tool.run(&request).unwrap_err();

    assert!(err.to_string().contains("Table or view not found"));
}

#[test]
fn test_rows_preserve_column_order() {
    let client = MockDatabaseClient::with_rows(
        columns(&["z", "a", "m"]),
        vec![vec![Value::Int(1), Value::Int(2), Value::Int(3)]],
    );
    let tool = QueryTool::with_client(Box::new(client));

    let output = tool.run(&QueryRequest::new("SELECT z, a, m FROM t")).unwrap();

    let keys: Vec<&String> = output.rows[0].keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_definition_matches_tool() {
    let tool = QueryTool::with_client(Box::new(MockDatabaseClient::new()));
    let definition = tool_definition();

    assert_eq!(definition.name, tool.name());
    assert_eq!(definition.description, tool.description());
    assert_eq!(definition.parameters, tool.parameters());
}

#[tokio::test]
async fn test_call_through_tool_trait() {
    let client = MockDatabaseClient::with_rows(
        columns(&["x", "label"]),
        vec![vec![Value::Int(1), Value::from("one")]],
    );
    let tool = QueryTool::with_client(Box::new(client));

    let value = tool
        .call(json!({
            "sql": "SELECT x, label FROM t",
            "catalog": "lakehouse",
            "max_rows": 10
        }))
        .await
        .unwrap();

    assert_eq!(
        value,
        json!({"rows": [{"x": 1, "label": "one"}], "rowcount": 1})
    );
}

#[tokio::test]
async fn test_call_with_missing_sql_is_an_error() {
    let tool = QueryTool::with_client(Box::new(MockDatabaseClient::new()));

    let result = tool.call(json!({"catalog": "lakehouse"})).await;

    assert!(result.is_err());
}
