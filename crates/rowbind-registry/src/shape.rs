//! Declared field-serialization protocol

use chrono::NaiveDateTime;

/// Errors raised while describing an object's shape
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// The type cannot be described through its declared serialization.
    /// This is the signal that selects the reflective fallback.
    #[error("incompatible with declared serialization: {0}")]
    Incompatible(String),

    /// A writer rejected a field
    #[error("field write failed: {0}")]
    Write(String),

    /// The reflective rendering of the instance failed
    #[error("reflective serialization failed: {0}")]
    Reflection(String),
}

/// Writer a type's declared serialization drives, one call per field
///
/// Values are accepted so that implementations of [`DeclaredFields`] read
/// like ordinary serialization code; descriptor capture discards them and
/// records only the name/type pairs.
pub trait FieldWriter {
    fn write_bool(&mut self, name: &str, value: bool) -> Result<(), ShapeError>;

    fn write_byte(&mut self, name: &str, value: i8) -> Result<(), ShapeError>;

    fn write_short(&mut self, name: &str, value: i16) -> Result<(), ShapeError>;

    fn write_int(&mut self, name: &str, value: i32) -> Result<(), ShapeError>;

    fn write_long(&mut self, name: &str, value: i64) -> Result<(), ShapeError>;

    fn write_float(&mut self, name: &str, value: f32) -> Result<(), ShapeError>;

    fn write_double(&mut self, name: &str, value: f64) -> Result<(), ShapeError>;

    fn write_string(&mut self, name: &str, value: &str) -> Result<(), ShapeError>;

    fn write_date(&mut self, name: &str, value: NaiveDateTime) -> Result<(), ShapeError>;

    fn write_byte_array(&mut self, name: &str, value: &[u8]) -> Result<(), ShapeError>;

    /// Record an opaque object-typed field (nested objects, collections)
    fn write_object(&mut self, name: &str) -> Result<(), ShapeError>;
}

/// A type that declares its own serializable field layout
///
/// Implementations write every serializable field exactly once, in
/// declaration order. Types without an implementation are described through
/// the reflective fallback instead.
pub trait DeclaredFields {
    fn write_fields(&self, writer: &mut dyn FieldWriter) -> Result<(), ShapeError>;
}
