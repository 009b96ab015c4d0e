//! Key column inference

use rowbind_catalog::TableMetadata;

/// Infer key columns when the spec supplies none
///
/// Explicit key columns suppress inference entirely: the result is `None`
/// and the caller keeps what it was given. With no explicit keys the table's
/// declared key columns are returned in reported order; a table with no
/// declared key yields `Some` of an empty list, which is valid.
pub fn resolve_key_columns(explicit: &[String], metadata: &TableMetadata) -> Option<Vec<String>> {
    if explicit.is_empty() {
        Some(metadata.key_columns.clone())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowbind_core::{ColumnDescriptor, SqlType};

    fn metadata_with_keys(keys: Vec<&str>) -> TableMetadata {
        TableMetadata::new(
            "orders",
            vec![ColumnDescriptor::new("id", SqlType::Integer, false)],
            keys.into_iter().map(String::from).collect(),
        )
    }

    #[test]
    fn explicit_keys_suppress_inference() {
        let metadata = metadata_with_keys(vec!["id"]);
        let explicit = vec!["custom_key".to_string()];

        assert_eq!(resolve_key_columns(&explicit, &metadata), None);
    }

    #[test]
    fn declared_keys_inferred_in_reported_order() {
        let metadata = metadata_with_keys(vec!["region", "id"]);

        assert_eq!(
            resolve_key_columns(&[], &metadata),
            Some(vec!["region".to_string(), "id".to_string()])
        );
    }

    #[test]
    fn table_without_declared_key_infers_empty() {
        let metadata = metadata_with_keys(vec![]);

        assert_eq!(resolve_key_columns(&[], &metadata), Some(Vec::new()));
    }
}
