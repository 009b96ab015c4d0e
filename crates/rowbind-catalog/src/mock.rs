//! Mock table catalog for testing
//!
//! This catalog returns predefined table metadata without connecting to any
//! database. It's useful for:
//! - Unit testing the mapping pipeline
//! - Integration testing CI/CD pipelines
//! - Demos and examples without real credentials
//! - Simulating various error conditions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rowbind_catalog::{MockCatalog, TableCatalog, TableMetadata};
//! use rowbind_core::{ColumnDescriptor, SqlType};
//!
//! let catalog = MockCatalog::new();
//! catalog.add_table(TableMetadata::new(
//!     "orders",
//!     vec![ColumnDescriptor::new("id", SqlType::Integer, false)],
//!     vec!["id".to_string()],
//! )).await;
//!
//! let metadata = catalog.table_metadata("orders").await?;
//! ```
//!
//! ## Simulating Failures
//!
//! ```rust,ignore
//! // Simulate connection failure
//! let catalog = MockCatalog::new().with_connection_failure();
//! assert!(catalog.test_connection().await.is_err());
//!
//! // Simulate query latency
//! let catalog = MockCatalog::new().with_latency(100); // 100ms delay
//! ```

use crate::source::{FetchError, TableCatalog, TableMetadata};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock table catalog for testing
///
/// Stores table metadata in memory and returns it when requested. Errors can
/// be injected per table, and connection failures and latency simulated.
pub struct MockCatalog {
    /// Predefined metadata by table name
    tables: Arc<RwLock<HashMap<String, TableMetadata>>>,

    /// Errors to return for specific tables
    errors: Arc<RwLock<HashMap<String, FetchError>>>,

    /// Simulate connection failure
    fail_connection: bool,

    /// Simulate query latency (milliseconds)
    latency_ms: u64,

    /// Name to return from name() method
    catalog_name: &'static str,
}

impl MockCatalog {
    /// Create a new mock catalog with no predefined tables
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            fail_connection: false,
            latency_ms: 0,
            catalog_name: "Mock",
        }
    }

    /// Add metadata for a table
    ///
    /// The metadata will be returned when `table_metadata` is called with a
    /// matching table name.
    pub async fn add_table(&self, metadata: TableMetadata) {
        self.tables
            .write()
            .await
            .insert(metadata.table.clone(), metadata);
    }

    /// Configure an error to be returned for a specific table
    pub async fn add_error_for_table(&self, table: impl Into<String>, error: FetchError) {
        self.errors.write().await.insert(table.into(), error);
    }

    /// Configure to fail all connection tests
    pub fn with_connection_failure(mut self) -> Self {
        self.fail_connection = true;
        self
    }

    /// Configure simulated latency for all operations
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set a custom catalog name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.catalog_name = name;
        self
    }

    /// Get the number of tables stored in the catalog
    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }

    /// Check if metadata exists for a table
    pub async fn has_table(&self, table: &str) -> bool {
        self.tables.read().await.contains_key(table)
    }

    /// Simulate latency if configured
    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockCatalog {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            errors: Arc::clone(&self.errors),
            fail_connection: self.fail_connection,
            latency_ms: self.latency_ms,
            catalog_name: self.catalog_name,
        }
    }
}

#[async_trait::async_trait]
impl TableCatalog for MockCatalog {
    fn name(&self) -> &'static str {
        self.catalog_name
    }

    async fn table_metadata(&self, table: &str) -> Result<TableMetadata, FetchError> {
        self.simulate_latency().await;

        // Check for configured errors first
        if let Some(error) = self.errors.read().await.get(table) {
            return Err(error.clone());
        }

        let tables = self.tables.read().await;
        tables
            .get(table)
            .cloned()
            .ok_or_else(|| FetchError::TableNotFound(table.to_string()))
    }

    async fn test_connection(&self) -> Result<(), FetchError> {
        self.simulate_latency().await;

        if self.fail_connection {
            Err(FetchError::NetworkError(
                "Simulated connection failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
