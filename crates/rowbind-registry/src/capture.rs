//! Throwaway writer that captures a descriptor from declared serialization

use crate::shape::{FieldWriter, ShapeError};
use chrono::NaiveDateTime;
use rowbind_core::{FieldDescriptor, FieldType, TypeDescriptor};

/// Records the name/type pair of every field written through it
///
/// Values are discarded; the only product is the [`TypeDescriptor`]
/// returned by [`DescriptorCapture::finish`].
pub struct DescriptorCapture {
    type_name: String,
    fields: Vec<FieldDescriptor>,
}

impl DescriptorCapture {
    /// Create a capture writer for the given type name
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    fn record(&mut self, name: &str, field_type: FieldType) -> Result<(), ShapeError> {
        if self.fields.iter().any(|f| f.name == name) {
            return Err(ShapeError::Write(format!(
                "field \"{}\" written more than once",
                name
            )));
        }
        self.fields.push(FieldDescriptor::new(name, field_type));
        Ok(())
    }

    /// Finish the capture, producing the descriptor
    pub fn finish(self) -> TypeDescriptor {
        TypeDescriptor::new(self.type_name, self.fields)
    }
}

impl FieldWriter for DescriptorCapture {
    fn write_bool(&mut self, name: &str, _value: bool) -> Result<(), ShapeError> {
        self.record(name, FieldType::Boolean)
    }

    fn write_byte(&mut self, name: &str, _value: i8) -> Result<(), ShapeError> {
        self.record(name, FieldType::Byte)
    }

    fn write_short(&mut self, name: &str, _value: i16) -> Result<(), ShapeError> {
        self.record(name, FieldType::Short)
    }

    fn write_int(&mut self, name: &str, _value: i32) -> Result<(), ShapeError> {
        self.record(name, FieldType::Int)
    }

    fn write_long(&mut self, name: &str, _value: i64) -> Result<(), ShapeError> {
        self.record(name, FieldType::Long)
    }

    fn write_float(&mut self, name: &str, _value: f32) -> Result<(), ShapeError> {
        self.record(name, FieldType::Float)
    }

    fn write_double(&mut self, name: &str, _value: f64) -> Result<(), ShapeError> {
        self.record(name, FieldType::Double)
    }

    fn write_string(&mut self, name: &str, _value: &str) -> Result<(), ShapeError> {
        self.record(name, FieldType::String)
    }

    fn write_date(&mut self, name: &str, _value: NaiveDateTime) -> Result<(), ShapeError> {
        self.record(name, FieldType::Date)
    }

    fn write_byte_array(&mut self, name: &str, _value: &[u8]) -> Result<(), ShapeError> {
        self.record(name, FieldType::ByteArray)
    }

    fn write_object(&mut self, name: &str) -> Result<(), ShapeError> {
        self.record(name, FieldType::Object)
    }
}
