//! Two-pass column-to-field name matching

use rowbind_core::{ColumnDescriptor, FieldDescriptor, FieldMapping, MappingError};

/// Match one column against the type's fields
///
/// Two passes: an exact case-sensitive scan where the first match wins, then
/// a case-insensitive scan that must find exactly one candidate. The mapping
/// copies the column's type and nullability and the field's type as-is; no
/// compatibility checking happens here.
///
/// Whether two different columns resolve to the same field is not checked;
/// uniqueness is enforced per column only.
pub fn match_column(
    column: &ColumnDescriptor,
    fields: &[FieldDescriptor],
) -> Result<FieldMapping, MappingError> {
    if let Some(field) = fields.iter().find(|f| f.name == column.name) {
        return Ok(mapping_for(column, field));
    }

    let mut inexact: Option<&FieldDescriptor> = None;
    for field in fields {
        if field.name.to_lowercase() == column.name.to_lowercase() {
            if inexact.is_some() {
                return Err(MappingError::AmbiguousFieldMatch(column.name.clone()));
            }
            inexact = Some(field);
        }
    }

    match inexact {
        Some(field) => Ok(mapping_for(column, field)),
        None => Err(MappingError::NoFieldMatch(column.name.clone())),
    }
}

fn mapping_for(column: &ColumnDescriptor, field: &FieldDescriptor) -> FieldMapping {
    FieldMapping::new(
        &field.name,
        field.field_type,
        &column.name,
        column.data_type,
        column.nullable,
    )
}
