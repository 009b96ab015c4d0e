//! SQL column types and serialization field types

use serde::{Deserialize, Serialize};

/// SQL column type as reported by table metadata
///
/// Mirrors the standard SQL type vocabulary. Database-specific type strings
/// are normalized into this set by the catalog adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlType {
    /// Single bit
    Bit,

    /// Boolean
    Boolean,

    /// 8-bit integer
    #[serde(rename = "TINYINT")]
    TinyInt,

    /// 16-bit integer
    #[serde(rename = "SMALLINT")]
    SmallInt,

    /// 32-bit integer
    Integer,

    /// 64-bit integer
    #[serde(rename = "BIGINT")]
    BigInt,

    /// Single-precision floating point
    Real,

    /// Floating point (precision unspecified)
    Float,

    /// Double-precision floating point
    Double,

    /// Arbitrary-precision numeric
    Numeric,

    /// Fixed-point decimal
    Decimal,

    /// Fixed-length character
    Char,

    /// Variable-length character
    Varchar,

    /// Long variable-length character (text)
    #[serde(rename = "LONGVARCHAR")]
    LongVarchar,

    /// Date (no time component)
    Date,

    /// Time of day
    Time,

    /// Timestamp (with time component)
    Timestamp,

    /// Fixed-length binary
    Binary,

    /// Variable-length binary
    #[serde(rename = "VARBINARY")]
    VarBinary,

    /// Binary large object
    Blob,

    /// Character large object
    Clob,

    /// Anything the catalog cannot classify
    Other,
}

impl SqlType {
    /// Get the type as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Real => "REAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Numeric => "NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::LongVarchar => "LONGVARCHAR",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::Blob => "BLOB",
            Self::Clob => "CLOB",
            Self::Other => "OTHER",
        }
    }

    /// Convert a PostgreSQL data type string to a SqlType
    ///
    /// Handles the type strings reported by information_schema.columns,
    /// including precision suffixes like `numeric(10,2)` and the internal
    /// array notation (`_int4`).
    pub fn from_postgres(pg_type: &str) -> SqlType {
        let base_type = pg_type
            .split('(')
            .next()
            .unwrap_or(pg_type)
            .trim()
            .to_lowercase();

        match base_type.as_str() {
            "boolean" | "bool" => Self::Boolean,
            "bit" => Self::Bit,

            "smallint" | "int2" | "smallserial" | "serial2" => Self::SmallInt,
            "integer" | "int" | "int4" | "serial" | "serial4" => Self::Integer,
            "bigint" | "int8" | "bigserial" | "serial8" => Self::BigInt,

            "real" | "float4" => Self::Real,
            "double precision" | "float8" | "float" => Self::Double,

            "numeric" => Self::Numeric,
            "decimal" | "money" => Self::Decimal,

            "character" | "char" | "bpchar" => Self::Char,
            "character varying" | "varchar" => Self::Varchar,
            "text" | "name" | "citext" => Self::LongVarchar,

            "date" => Self::Date,
            "time without time zone" | "time" | "time with time zone" | "timetz" => Self::Time,
            "timestamp without time zone" | "timestamp" | "timestamp with time zone"
            | "timestamptz" => Self::Timestamp,

            "bytea" => Self::VarBinary,

            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialization field type of an object type's field
///
/// This is the type vocabulary a type descriptor speaks. The reflective
/// fallback infers these from an instance's serialized shape; the declared
/// path records them from the writer calls a type makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Boolean field
    Boolean,

    /// 8-bit integer field
    Byte,

    /// 16-bit integer field
    Short,

    /// 32-bit integer field
    Int,

    /// 64-bit integer field
    Long,

    /// Single-precision float field
    Float,

    /// Double-precision float field
    Double,

    /// String field
    String,

    /// Date/timestamp field
    Date,

    /// Raw byte array field
    ByteArray,

    /// Array of objects field
    ObjectArray,

    /// Anything else (nested objects, optional fields with no value)
    Object,
}

impl FieldType {
    /// Get the type as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Byte => "BYTE",
            Self::Short => "SHORT",
            Self::Int => "INT",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Date => "DATE",
            Self::ByteArray => "BYTE_ARRAY",
            Self::ObjectArray => "OBJECT_ARRAY",
            Self::Object => "OBJECT",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
