//! Mapping specs, field mappings, and the pipeline result

use crate::types::{FieldType, SqlType};
use serde::{Deserialize, Serialize};

/// Request to reconcile one table with one object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSpec {
    /// Named data source the table lives in
    pub data_source: String,

    /// Table name, as given by the operator
    pub table: String,

    /// Registered object type name
    pub type_name: String,

    /// Explicit key columns; when empty the table's declared keys are inferred
    #[serde(default)]
    pub key_columns: Vec<String>,
}

impl MappingSpec {
    /// Create a spec with no explicit key columns
    pub fn new(
        data_source: impl Into<String>,
        table: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            table: table.into(),
            type_name: type_name.into(),
            key_columns: Vec::new(),
        }
    }

    /// Set explicit key columns
    pub fn with_key_columns(mut self, key_columns: Vec<String>) -> Self {
        self.key_columns = key_columns;
        self
    }
}

/// The resolved correspondence between one column and one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Matched field name, in the type's casing
    pub field_name: String,

    /// The field's declared serialization type
    pub field_type: FieldType,

    /// Column name, in the database's casing
    pub column_name: String,

    /// The column's reported SQL type
    pub column_type: SqlType,

    /// The column's reported nullability
    pub column_nullable: bool,
}

impl FieldMapping {
    /// Create a new field mapping
    pub fn new(
        field_name: impl Into<String>,
        field_type: FieldType,
        column_name: impl Into<String>,
        column_type: SqlType,
        column_nullable: bool,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_type,
            column_name: column_name.into(),
            column_type,
            column_nullable,
        }
    }
}

/// Successful outcome of one pipeline run
///
/// `inferred_key_columns` is present only when the spec carried no explicit
/// key columns; it holds the table's declared key columns in reported order
/// and may be empty for a table with no declared key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingResult {
    /// Key columns inferred from table metadata, if any inference ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred_key_columns: Option<Vec<String>>,

    /// One mapping per table column, in column order
    pub field_mappings: Vec<FieldMapping>,
}

impl MappingResult {
    /// Comma-joined inferred key columns, for the report payload
    pub fn inferred_key_string(&self) -> Option<String> {
        self.inferred_key_columns.as_ref().map(|keys| keys.join(","))
    }
}
