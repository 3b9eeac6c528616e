//! Command-line argument parsing for the AIDP query tool.

use crate::db::{DatabaseBackend, QueryRequest, DEFAULT_MAX_ROWS};
use clap::Parser;

/// Run SQL against OCI AIDP (Spark) from the command line.
#[derive(Parser, Debug)]
#[command(name = "aidp-query")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQL to run (Spark SQL / SQL-92)
    #[arg(value_name = "SQL")]
    pub sql: Option<String>,

    /// Catalog to select with USE CATALOG before the query
    #[arg(short = 'c', long, value_name = "CATALOG")]
    pub catalog: Option<String>,

    /// Schema (database) to select with USE before the query
    #[arg(short = 's', long, value_name = "SCHEMA")]
    pub schema: Option<String>,

    /// Maximum number of rows to return
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,

    /// Use the in-memory mock backend (no driver, for testing)
    #[arg(long)]
    pub mock: bool,

    /// Print the tool definition as JSON and exit
    #[arg(long)]
    pub definition: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts the CLI arguments to a query request.
    ///
    /// Returns `None` when no SQL argument was given.
    pub fn to_request(&self) -> Option<QueryRequest> {
        let sql = self.sql.clone()?;
        let mut request = QueryRequest::new(sql).with_max_rows(self.max_rows);
        if let Some(catalog) = &self.catalog {
            request = request.with_catalog(catalog.clone());
        }
        if let Some(schema) = &self.schema {
            request = request.with_schema(schema.clone());
        }
        Some(request)
    }

    /// Returns the backend selected by the flags.
    pub fn backend(&self) -> DatabaseBackend {
        if self.mock {
            DatabaseBackend::Mock
        } else {
            DatabaseBackend::Spark
        }
    }
}
