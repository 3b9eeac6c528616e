//! Database abstraction layer for the AIDP query tool.
//!
//! Provides a trait-based interface for query execution, allowing the real
//! driver-bridge backend and the in-memory mock to be used interchangeably.

mod mock;
mod spark;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use spark::SparkClient;
pub use types::{QueryRequest, QueryResult, Record, Value, DEFAULT_MAX_ROWS};

use crate::error::Result;

/// Supported query backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseBackend {
    /// The Spark driver bridge (the real thing).
    #[default]
    Spark,
    /// In-memory mock, for tests and offline runs.
    Mock,
}

impl DatabaseBackend {
    /// Returns the backend as a string for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spark => "spark",
            Self::Mock => "mock",
        }
    }
}

/// Creates a database client for the given backend.
///
/// This is the central factory function for query backends.
pub fn client_for(backend: DatabaseBackend) -> Result<Box<dyn DatabaseClient>> {
    match backend {
        DatabaseBackend::Spark => Ok(Box::new(SparkClient::new()?)),
        DatabaseBackend::Mock => Ok(Box::new(MockDatabaseClient::new())),
    }
}

/// Trait defining the interface for query backends.
///
/// One call runs one query: the backend reads its configuration, opens its
/// own connection, runs the catalog/schema preamble, executes the SQL, and
/// releases every resource before returning. Implementations hold no
/// per-call state, so a single client may serve concurrent callers.
pub trait DatabaseClient: Send + Sync {
    /// Executes a query and returns the fetched rows as records.
    fn execute(&self, request: &QueryRequest) -> Result<QueryResult>;
}

impl<T: DatabaseClient + ?Sized> DatabaseClient for std::sync::Arc<T> {
    fn execute(&self, request: &QueryRequest) -> Result<QueryResult> {
        (**self).execute(request)
    }
}
