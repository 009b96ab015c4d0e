//! Table catalog trait and the named data-source registry

use rowbind_core::{ColumnDescriptor, SqlType};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Errors that can occur when fetching table metadata
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Structural metadata for one table
///
/// Columns are ordered by ordinal position as reported by the database;
/// key columns are the declared primary key columns in their reported
/// order, which may be empty for a table with no declared key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    /// Table name
    pub table: String,

    /// Ordered column descriptors
    pub columns: Vec<ColumnDescriptor>,

    /// Declared key column names, in reported order
    pub key_columns: Vec<String>,
}

impl TableMetadata {
    /// Create metadata from ordered columns and key columns
    pub fn new(
        table: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        key_columns: Vec<String>,
    ) -> Self {
        Self {
            table: table.into(),
            columns,
            key_columns,
        }
    }

    /// Column names in ordinal order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether a column accepts NULL, by name
    pub fn is_nullable(&self, column_name: &str) -> Option<bool> {
        self.columns
            .iter()
            .find(|c| c.name == column_name)
            .map(|c| c.nullable)
    }

    /// A column's SQL type, by name
    pub fn data_type(&self, column_name: &str) -> Option<SqlType> {
        self.columns
            .iter()
            .find(|c| c.name == column_name)
            .map(|c| c.data_type)
    }
}

/// Trait for catalogs that can describe tables in a database
#[async_trait::async_trait]
pub trait TableCatalog: Send + Sync {
    /// Get the catalog name (e.g., "PostgreSQL", "Mock")
    fn name(&self) -> &'static str;

    /// Fetch structural metadata for a table
    ///
    /// This queries the database's information schema for column names,
    /// types, nullability, and the declared primary key columns.
    async fn table_metadata(&self, table: &str) -> Result<TableMetadata, FetchError>;

    /// Test the connection to the database
    async fn test_connection(&self) -> Result<(), FetchError>;
}

/// Registry of named data sources
///
/// A mapping check names its data source; the registry resolves the name to
/// the catalog that can describe tables in it. An unregistered name is a
/// miss, not an error - the pipeline turns it into its own failure.
#[derive(Default)]
pub struct DataSourceRegistry {
    sources: RwLock<HashMap<String, Arc<dyn TableCatalog>>>,
}

impl DataSourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn TableCatalog>>> {
        match self.sources.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn TableCatalog>>> {
        match self.sources.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a data source under a name
    pub fn register(&self, name: impl Into<String>, catalog: Arc<dyn TableCatalog>) {
        self.write().insert(name.into(), catalog);
    }

    /// Resolve a data source name
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn TableCatalog>> {
        self.read().get(name).cloned()
    }

    /// Registered data source names, unordered
    pub fn source_names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }
}
