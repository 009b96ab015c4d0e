//! Structural validation before matching

use rowbind_core::{ColumnDescriptor, MappingError, TypeDescriptor};

/// Reject shapes that cannot possibly align
///
/// A 1:1 mapping requires the table and the type to have the same number of
/// columns/fields. Running this before any matching keeps a shape mismatch
/// from surfacing as a confusing per-column failure.
pub fn validate_field_counts(
    columns: &[ColumnDescriptor],
    descriptor: &TypeDescriptor,
) -> Result<(), MappingError> {
    if columns.len() != descriptor.field_count() {
        return Err(MappingError::FieldCountMismatch {
            column_count: columns.len(),
            field_count: descriptor.field_count(),
        });
    }
    Ok(())
}
