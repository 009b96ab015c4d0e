//! The mapping check pipeline

use crate::keys::resolve_key_columns;
use crate::matcher::match_column;
use crate::validate::validate_field_counts;
use rowbind_catalog::DataSourceRegistry;
use rowbind_core::{
    CheckOutcome, CheckReport, MappingError, MappingResult, MappingSpec, TypeDescriptor,
};
use rowbind_registry::{generate_descriptor, DescriptorStore, ObjectCatalog};
use std::sync::Arc;

/// Runs the mapping precondition check
///
/// The pipeline itself is stateless between runs; all shared state lives in
/// the injected collaborators. A run is strictly linear - resolve the data
/// source, resolve or generate the type descriptor, fetch table metadata,
/// validate, match each column, infer keys - and the first failure aborts
/// the whole run. There is no partial result.
pub struct MappingPipeline {
    sources: Arc<DataSourceRegistry>,
    types: Arc<ObjectCatalog>,
    store: Arc<DescriptorStore>,
}

impl MappingPipeline {
    /// Create a pipeline over the given collaborators
    pub fn new(
        sources: Arc<DataSourceRegistry>,
        types: Arc<ObjectCatalog>,
        store: Arc<DescriptorStore>,
    ) -> Self {
        Self {
            sources,
            types,
            store,
        }
    }

    /// Run one mapping check
    pub async fn run(&self, spec: &MappingSpec) -> Result<MappingResult, MappingError> {
        let catalog = self
            .sources
            .resolve(&spec.data_source)
            .ok_or_else(|| MappingError::DataSourceNotFound(spec.data_source.clone()))?;

        let descriptor = self.resolve_descriptor(&spec.type_name)?;

        let metadata = catalog
            .table_metadata(&spec.table)
            .await
            .map_err(|e| MappingError::Database(e.to_string()))?;

        validate_field_counts(&metadata.columns, &descriptor)?;

        let mut field_mappings = Vec::with_capacity(metadata.columns.len());
        for column in &metadata.columns {
            field_mappings.push(match_column(column, &descriptor.fields)?);
        }

        let inferred_key_columns = resolve_key_columns(&spec.key_columns, &metadata);

        Ok(MappingResult {
            inferred_key_columns,
            field_mappings,
        })
    }

    /// Run one mapping check and fold the outcome into a member-tagged report
    pub async fn check(&self, spec: &MappingSpec, member: impl Into<String>) -> CheckReport {
        let outcome = match self.run(spec).await {
            Ok(result) => CheckOutcome::Ok {
                inferred_key_columns: result.inferred_key_string(),
                field_mappings: result.field_mappings,
            },
            Err(e) => CheckOutcome::Failed {
                error_kind: e.kind(),
                message: e.to_string(),
            },
        };
        CheckReport::new(member, outcome)
    }

    /// Resolve a type descriptor, generating and registering on a store miss
    ///
    /// The store lookup always precedes generation, so a cached descriptor
    /// short-circuits generation entirely. Registration is first-writer-wins:
    /// when two runs race on the same uncached type the store keeps one
    /// canonical descriptor and both runs use it.
    fn resolve_descriptor(&self, type_name: &str) -> Result<Arc<TypeDescriptor>, MappingError> {
        if let Some(descriptor) = self.store.lookup(type_name) {
            return Ok(descriptor);
        }
        let (descriptor, _source) = generate_descriptor(&self.types, type_name)?;
        Ok(self.store.register(descriptor))
    }
}
