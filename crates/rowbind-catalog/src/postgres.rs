//! PostgreSQL table catalog using information_schema
//!
//! This catalog queries PostgreSQL's information_schema views to fetch
//! column metadata and declared primary key columns. It works with:
//! - PostgreSQL 9.4+
//! - Amazon Redshift
//! - CockroachDB
//! - Other PostgreSQL-compatible databases
//!
//! A connection is opened inside each metadata fetch and dropped when the
//! fetch returns, on every exit path. No connection outlives a call.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let catalog = PostgresCatalog::new(
//!     "host=localhost port=5432 dbname=orders user=app password=secret"
//! );
//! let metadata = catalog.table_metadata("orders").await?;
//! ```
//!
//! Reference: https://www.postgresql.org/docs/current/information-schema-columns.html

use crate::source::{FetchError, TableCatalog, TableMetadata};

#[cfg(feature = "postgres")]
use rowbind_core::{ColumnDescriptor, SqlType};

#[cfg(feature = "postgres")]
use tokio_postgres::NoTls;

/// PostgreSQL table catalog
///
/// Holds connection configuration only; the client itself is scoped to each
/// metadata fetch.
pub struct PostgresCatalog {
    /// PostgreSQL connection string
    conn_str: String,

    /// Schema the tables live in
    schema: String,
}

impl PostgresCatalog {
    /// Create a catalog from a PostgreSQL connection string
    ///
    /// Supports standard PostgreSQL connection string format:
    /// `host=localhost port=5432 dbname=mydb user=postgres password=secret`
    pub fn new(conn_str: impl Into<String>) -> Self {
        Self {
            conn_str: conn_str.into(),
            schema: "public".to_string(),
        }
    }

    /// Set the schema to describe tables in (default: `public`)
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// The configured schema
    pub fn schema(&self) -> &str {
        &self.schema
    }

    #[cfg(feature = "postgres")]
    async fn connect(&self) -> Result<tokio_postgres::Client, FetchError> {
        let (client, connection) = tokio_postgres::connect(&self.conn_str, NoTls)
            .await
            .map_err(|e| {
                FetchError::AuthenticationError(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        // Drive the connection until the client is dropped
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(client)
    }

    #[cfg(feature = "postgres")]
    fn classify_query_error(table: &str, e: tokio_postgres::Error) -> FetchError {
        let err_str = e.to_string();
        if err_str.contains("does not exist") {
            FetchError::TableNotFound(table.to_string())
        } else if err_str.contains("permission denied") {
            FetchError::PermissionDenied(format!("Cannot access {}: {}", table, err_str))
        } else {
            FetchError::QueryError(err_str)
        }
    }
}

#[async_trait::async_trait]
impl TableCatalog for PostgresCatalog {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    #[cfg(feature = "postgres")]
    async fn table_metadata(&self, table: &str) -> Result<TableMetadata, FetchError> {
        let client = self.connect().await?;

        let column_query = r#"
            SELECT
                column_name,
                data_type,
                is_nullable,
                ordinal_position
            FROM information_schema.columns
            WHERE table_schema = $1
              AND table_name = $2
            ORDER BY ordinal_position
        "#;

        let rows = client
            .query(column_query, &[&self.schema, &table])
            .await
            .map_err(|e| Self::classify_query_error(table, e))?;

        let mut columns = Vec::new();
        for row in rows {
            let col_name: String = row.get(0);
            let data_type: String = row.get(1);
            let is_nullable: String = row.get(2);

            columns.push(ColumnDescriptor::new(
                col_name,
                SqlType::from_postgres(&data_type),
                is_nullable.eq_ignore_ascii_case("YES"),
            ));
        }

        if columns.is_empty() {
            return Err(FetchError::TableNotFound(format!(
                "Table {}.{} not found or has no columns",
                self.schema, table
            )));
        }

        let key_query = r#"
            SELECT kcu.column_name
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
              ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
            WHERE tc.constraint_type = 'PRIMARY KEY'
              AND tc.table_schema = $1
              AND tc.table_name = $2
            ORDER BY kcu.ordinal_position
        "#;

        let key_rows = client
            .query(key_query, &[&self.schema, &table])
            .await
            .map_err(|e| Self::classify_query_error(table, e))?;

        let key_columns = key_rows.iter().map(|row| row.get(0)).collect();

        Ok(TableMetadata::new(table, columns, key_columns))
    }

    #[cfg(not(feature = "postgres"))]
    async fn table_metadata(&self, _table: &str) -> Result<TableMetadata, FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }

    #[cfg(feature = "postgres")]
    async fn test_connection(&self) -> Result<(), FetchError> {
        let client = self.connect().await?;
        client
            .query("SELECT 1", &[])
            .await
            .map_err(|e| FetchError::QueryError(format!("Connection test failed: {}", e)))?;
        Ok(())
    }

    #[cfg(not(feature = "postgres"))]
    async fn test_connection(&self) -> Result<(), FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_public() {
        let catalog = PostgresCatalog::new("host=localhost dbname=orders user=app");
        assert_eq!(catalog.schema(), "public");
        assert_eq!(catalog.name(), "PostgreSQL");
    }

    #[test]
    fn schema_override() {
        let catalog =
            PostgresCatalog::new("host=localhost dbname=orders user=app").with_schema("sales");
        assert_eq!(catalog.schema(), "sales");
    }
}
