//! Error taxonomy for the mapping pipeline
//!
//! Error kind codes are stable and versioned - never rename or remove them,
//! only add new ones.

use serde::{Deserialize, Serialize};

/// Stable error kind codes (v1)
///
/// Every pipeline failure maps to exactly one of these. The codes appear in
/// reports and must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The named data source is not registered
    DataSourceNotFound,

    /// Column count and field count differ
    FieldCountMismatch,

    /// No field name matched a column name
    NoFieldMatch,

    /// More than one field name matched a column name
    AmbiguousFieldMatch,

    /// The object type name is not registered
    TypeNotRegistered,

    /// The object type could not be default-constructed
    ConstructorFailed,

    /// Neither descriptor source could produce a descriptor
    DescriptorGeneration,

    /// Any underlying query or connection failure
    Database,
}

impl ErrorKind {
    /// Get the error kind as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataSourceNotFound => "DATA_SOURCE_NOT_FOUND",
            Self::FieldCountMismatch => "FIELD_COUNT_MISMATCH",
            Self::NoFieldMatch => "NO_FIELD_MATCH",
            Self::AmbiguousFieldMatch => "AMBIGUOUS_FIELD_MATCH",
            Self::TypeNotRegistered => "TYPE_NOT_REGISTERED",
            Self::ConstructorFailed => "CONSTRUCTOR_FAILED",
            Self::DescriptorGeneration => "DESCRIPTOR_GENERATION",
            Self::Database => "DATABASE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A terminal pipeline failure
///
/// Every failure aborts the whole run; no partial result is ever returned.
/// Messages are operator-facing and surfaced verbatim.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("data source named \"{0}\" not found. Register it under [data_sources.{0}] in rowbind.toml.")]
    DataSourceNotFound(String),

    #[error("the table and the object type must have the same number of columns/fields, but the table has {column_count} columns and the type has {field_count} fields")]
    FieldCountMismatch {
        column_count: usize,
        field_count: usize,
    },

    #[error("no field name matched the column name \"{0}\"")]
    NoFieldMatch(String),

    #[error("more than one field name matched the column name \"{0}\"")]
    AmbiguousFieldMatch(String),

    #[error("the object type \"{0}\" is not registered in the object catalog")]
    TypeNotRegistered(String),

    #[error("could not generate a descriptor for \"{type_name}\" because it could not be default-constructed: {reason}")]
    ConstructorFailed { type_name: String, reason: String },

    #[error("could not generate a descriptor for \"{type_name}\" using the reflective serializer after the declared serialization failed with: {cause}")]
    DescriptorGeneration { type_name: String, cause: String },

    #[error("database error: {0}")]
    Database(String),
}

impl MappingError {
    /// The stable error kind for this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DataSourceNotFound(_) => ErrorKind::DataSourceNotFound,
            Self::FieldCountMismatch { .. } => ErrorKind::FieldCountMismatch,
            Self::NoFieldMatch(_) => ErrorKind::NoFieldMatch,
            Self::AmbiguousFieldMatch(_) => ErrorKind::AmbiguousFieldMatch,
            Self::TypeNotRegistered(_) => ErrorKind::TypeNotRegistered,
            Self::ConstructorFailed { .. } => ErrorKind::ConstructorFailed,
            Self::DescriptorGeneration { .. } => ErrorKind::DescriptorGeneration,
            Self::Database(_) => ErrorKind::Database,
        }
    }
}
