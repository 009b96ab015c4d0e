//! Descriptor generation for types with no cached descriptor

use crate::capture::DescriptorCapture;
use crate::object_catalog::{ObjectCatalog, ObjectInstance};
use crate::shape::ShapeError;
use rowbind_core::{FieldDescriptor, FieldType, MappingError, TypeDescriptor};
use serde_json::Value;

/// Which descriptor source produced a generated descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorSource {
    /// The type's own declared field serialization
    Declared,

    /// Reflective field discovery through serde
    Reflective,
}

/// Generate a descriptor for a registered type
///
/// Resolves the type name, constructs a throwaway default instance, and
/// drives the declared serialization against a capture writer. When the
/// declared path reports a typed incompatibility the reflective fallback
/// runs instead; any other declared-path failure, and any fallback failure,
/// is terminal. The caller owns registration of the returned descriptor -
/// generation itself has no store side effects.
pub fn generate_descriptor(
    catalog: &ObjectCatalog,
    type_name: &str,
) -> Result<(TypeDescriptor, DescriptorSource), MappingError> {
    let registered = catalog
        .load(type_name)
        .ok_or_else(|| MappingError::TypeNotRegistered(type_name.to_string()))?;

    let instance = registered
        .construct_default()
        .map_err(|e| MappingError::ConstructorFailed {
            type_name: type_name.to_string(),
            reason: e.to_string(),
        })?;

    let mut capture = DescriptorCapture::new(type_name);
    match instance.write_fields(&mut capture) {
        Ok(()) => Ok((capture.finish(), DescriptorSource::Declared)),
        Err(ShapeError::Incompatible(cause)) => {
            let descriptor = reflect_descriptor(type_name, instance.as_ref()).map_err(
                |fallback| MappingError::DescriptorGeneration {
                    type_name: type_name.to_string(),
                    cause: format!("{} (reflective fallback failed with: {})", cause, fallback),
                },
            )?;
            Ok((descriptor, DescriptorSource::Reflective))
        }
        Err(other) => Err(MappingError::DescriptorGeneration {
            type_name: type_name.to_string(),
            cause: other.to_string(),
        }),
    }
}

/// Derive a descriptor from the instance's serialized shape
///
/// Only struct-like shapes can be described; a scalar or sequence at the
/// top level has no field layout to discover.
fn reflect_descriptor(
    type_name: &str,
    instance: &dyn ObjectInstance,
) -> Result<TypeDescriptor, ShapeError> {
    let value = instance.reflect()?;
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(ShapeError::Reflection(format!(
                "expected a struct-like shape, got {}",
                json_kind(&other)
            )))
        }
    };

    let fields = map
        .into_iter()
        .map(|(name, value)| FieldDescriptor::new(name, field_type_of(&value)))
        .collect();

    Ok(TypeDescriptor::new(type_name, fields))
}

fn field_type_of(value: &Value) -> FieldType {
    match value {
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => FieldType::Long,
        Value::Number(_) => FieldType::Double,
        Value::String(_) => FieldType::String,
        Value::Array(_) => FieldType::ObjectArray,
        Value::Object(_) | Value::Null => FieldType::Object,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}
