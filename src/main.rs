//! aidp-query - run SQL against OCI AIDP (Spark) over a driver bridge.

mod cli;
mod config;
mod db;
mod error;
mod tool;

use cli::Cli;
use db::{DatabaseBackend, MockDatabaseClient};
use error::{AidpError, Result};
use tool::{QueryTool, Tool};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Pick up a local .env before reading the AIDP_* variables.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.definition {
        println!("{}", to_pretty_json(&tool::tool_definition())?);
        return Ok(());
    }

    let Some(request) = cli.to_request() else {
        return Err(AidpError::config(
            "SQL argument is required (or use --definition)",
        ));
    };

    let backend = cli.backend();
    let tool = match backend {
        DatabaseBackend::Spark => QueryTool::new()?,
        DatabaseBackend::Mock => QueryTool::with_client(Box::new(MockDatabaseClient::new())),
    };

    info!(
        tool = tool.name(),
        backend = backend.as_str(),
        max_rows = request.max_rows,
        "running query"
    );

    let output = tool.run_async(&request).await?;

    println!("{}", to_pretty_json(&output)?);
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| AidpError::internal(e.to_string()))
}
