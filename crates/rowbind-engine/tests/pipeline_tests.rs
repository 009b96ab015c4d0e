//! Integration tests for the mapping pipeline
//!
//! These run the full check against a mock catalog, covering the success
//! path, every failure kind, and descriptor resolution through the store,
//! the declared serialization, and the reflective fallback.

use rowbind_catalog::{DataSourceRegistry, FetchError, MockCatalog, TableMetadata};
use rowbind_core::{
    ColumnDescriptor, FieldDescriptor, FieldType, MappingError, MappingSpec, SqlType,
    TypeDescriptor,
};
use rowbind_engine::MappingPipeline;
use rowbind_registry::{DeclaredFields, DescriptorStore, FieldWriter, ObjectCatalog, ShapeError};
use serde::Serialize;
use std::sync::Arc;

#[derive(Default, Serialize)]
struct Customer {
    id: i32,
    name: String,
}

impl DeclaredFields for Customer {
    fn write_fields(&self, writer: &mut dyn FieldWriter) -> Result<(), ShapeError> {
        writer.write_int("id", self.id)?;
        writer.write_string("name", &self.name)
    }
}

// No declared serialization; descriptor generation must go through the
// reflective fallback.
#[derive(Default, Serialize)]
struct Invoice {
    id: i64,
    total: f64,
}

fn customers_metadata() -> TableMetadata {
    TableMetadata::new(
        "customers",
        vec![
            ColumnDescriptor::new("id", SqlType::Integer, false),
            ColumnDescriptor::new("name", SqlType::Varchar, true),
        ],
        vec!["id".to_string()],
    )
}

async fn fixture(metadata: TableMetadata) -> (MappingPipeline, Arc<DescriptorStore>) {
    let catalog = MockCatalog::new();
    catalog.add_table(metadata).await;

    let sources = Arc::new(DataSourceRegistry::new());
    sources.register("orders-ds", Arc::new(catalog));

    let types = Arc::new(ObjectCatalog::new());
    types.register::<Customer>("example.Customer");
    types.register_serde::<Invoice>("example.Invoice");

    let store = Arc::new(DescriptorStore::new());
    let pipeline = MappingPipeline::new(sources, types, store.clone());
    (pipeline, store)
}

#[tokio::test]
async fn exact_match_produces_full_mapping_and_inferred_keys() {
    let (pipeline, _) = fixture(customers_metadata()).await;
    let spec = MappingSpec::new("orders-ds", "customers", "example.Customer");

    let result = pipeline.run(&spec).await.unwrap();

    assert_eq!(result.field_mappings.len(), 2);

    let id = &result.field_mappings[0];
    assert_eq!(id.field_name, "id");
    assert_eq!(id.field_type, FieldType::Int);
    assert_eq!(id.column_name, "id");
    assert_eq!(id.column_type, SqlType::Integer);
    assert!(!id.column_nullable);

    let name = &result.field_mappings[1];
    assert_eq!(name.field_name, "name");
    assert_eq!(name.field_type, FieldType::String);
    assert_eq!(name.column_type, SqlType::Varchar);
    assert!(name.column_nullable);

    assert_eq!(result.inferred_key_columns, Some(vec!["id".to_string()]));
    assert_eq!(result.inferred_key_string().as_deref(), Some("id"));
}

#[tokio::test]
async fn case_insensitive_match_resolves_via_fuzzy_pass() {
    let metadata = TableMetadata::new(
        "customers",
        vec![
            ColumnDescriptor::new("ID", SqlType::Integer, false),
            ColumnDescriptor::new("Name", SqlType::Varchar, true),
        ],
        vec!["ID".to_string()],
    );
    let (pipeline, _) = fixture(metadata).await;
    let spec = MappingSpec::new("orders-ds", "customers", "example.Customer");

    let result = pipeline.run(&spec).await.unwrap();

    // field names come from the type, column names from the table
    assert_eq!(result.field_mappings[0].field_name, "id");
    assert_eq!(result.field_mappings[0].column_name, "ID");
    assert_eq!(result.field_mappings[1].field_name, "name");
    assert_eq!(result.field_mappings[1].column_name, "Name");
}

#[tokio::test]
async fn unmatched_column_fails_with_no_field_match() {
    let metadata = TableMetadata::new(
        "customers",
        vec![
            ColumnDescriptor::new("id", SqlType::Integer, false),
            ColumnDescriptor::new("nm", SqlType::Varchar, true),
        ],
        vec![],
    );
    let (pipeline, _) = fixture(metadata).await;
    let spec = MappingSpec::new("orders-ds", "customers", "example.Customer");

    let err = pipeline.run(&spec).await.unwrap_err();
    assert!(matches!(err, MappingError::NoFieldMatch(c) if c == "nm"));
}

#[tokio::test]
async fn count_mismatch_rejected_before_matching() {
    let metadata = TableMetadata::new(
        "customers",
        vec![
            ColumnDescriptor::new("id", SqlType::Integer, false),
            ColumnDescriptor::new("name", SqlType::Varchar, true),
            ColumnDescriptor::new("email", SqlType::Varchar, true),
        ],
        vec![],
    );
    let (pipeline, _) = fixture(metadata).await;
    let spec = MappingSpec::new("orders-ds", "customers", "example.Customer");

    let err = pipeline.run(&spec).await.unwrap_err();
    match err {
        MappingError::FieldCountMismatch {
            column_count,
            field_count,
        } => {
            assert_eq!(column_count, 3);
            assert_eq!(field_count, 2);
        }
        other => panic!("expected FieldCountMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn two_case_variant_fields_make_a_column_ambiguous() {
    #[derive(Default, Serialize)]
    struct Clashing {
        name: String,
        #[serde(rename = "Name")]
        name_upper: String,
    }

    impl DeclaredFields for Clashing {
        fn write_fields(&self, writer: &mut dyn FieldWriter) -> Result<(), ShapeError> {
            writer.write_string("name", &self.name)?;
            writer.write_string("Name", &self.name_upper)
        }
    }

    let types = Arc::new(ObjectCatalog::new());
    types.register::<Clashing>("example.Clashing");
    let sources = Arc::new(DataSourceRegistry::new());
    let catalog = MockCatalog::new();
    catalog
        .add_table(TableMetadata::new(
            "labels",
            vec![
                ColumnDescriptor::new("NAME", SqlType::Varchar, true),
                ColumnDescriptor::new("other", SqlType::Varchar, true),
            ],
            vec![],
        ))
        .await;
    sources.register("orders-ds", Arc::new(catalog));
    let pipeline = MappingPipeline::new(sources, types, Arc::new(DescriptorStore::new()));

    let spec = MappingSpec::new("orders-ds", "labels", "example.Clashing");
    let err = pipeline.run(&spec).await.unwrap_err();
    assert!(matches!(err, MappingError::AmbiguousFieldMatch(c) if c == "NAME"));
}

#[tokio::test]
async fn unknown_data_source_fails_before_any_fetch() {
    let (pipeline, _) = fixture(customers_metadata()).await;
    let spec = MappingSpec::new("missing-ds", "customers", "example.Customer");

    let err = pipeline.run(&spec).await.unwrap_err();
    assert!(matches!(err, MappingError::DataSourceNotFound(name) if name == "missing-ds"));
}

#[tokio::test]
async fn explicit_keys_suppress_inference() {
    let (pipeline, _) = fixture(customers_metadata()).await;
    let spec = MappingSpec::new("orders-ds", "customers", "example.Customer")
        .with_key_columns(vec!["name".to_string()]);

    let result = pipeline.run(&spec).await.unwrap();
    assert!(result.inferred_key_columns.is_none());
}

#[tokio::test]
async fn reflective_fallback_descriptor_matches_like_a_cached_one() {
    let metadata = TableMetadata::new(
        "invoices",
        vec![
            ColumnDescriptor::new("id", SqlType::BigInt, false),
            ColumnDescriptor::new("total", SqlType::Double, false),
        ],
        vec!["id".to_string()],
    );
    let (pipeline, store) = fixture(metadata).await;
    let spec = MappingSpec::new("orders-ds", "invoices", "example.Invoice");

    let result = pipeline.run(&spec).await.unwrap();

    assert_eq!(result.field_mappings.len(), 2);
    let id = result
        .field_mappings
        .iter()
        .find(|m| m.column_name == "id")
        .unwrap();
    assert_eq!(id.field_type, FieldType::Long);

    // generation registered the descriptor for later runs
    assert!(store.lookup("example.Invoice").is_some());
}

#[tokio::test]
async fn cached_descriptor_short_circuits_generation() {
    let metadata = TableMetadata::new(
        "events",
        vec![ColumnDescriptor::new("id", SqlType::BigInt, false)],
        vec![],
    );
    let (pipeline, store) = fixture(metadata).await;

    // example.Event is not in the object catalog; only the cached descriptor
    // can satisfy this run
    store.register(TypeDescriptor::new(
        "example.Event",
        vec![FieldDescriptor::new("id", FieldType::Long)],
    ));

    let spec = MappingSpec::new("orders-ds", "events", "example.Event");
    let result = pipeline.run(&spec).await.unwrap();
    assert_eq!(result.field_mappings.len(), 1);
}

#[tokio::test]
async fn unregistered_type_fails_generation() {
    let (pipeline, _) = fixture(customers_metadata()).await;
    let spec = MappingSpec::new("orders-ds", "customers", "example.Unknown");

    let err = pipeline.run(&spec).await.unwrap_err();
    assert!(matches!(err, MappingError::TypeNotRegistered(_)));
}

#[tokio::test]
async fn fetch_failure_is_wrapped_as_database_error() {
    let catalog = MockCatalog::new();
    catalog
        .add_error_for_table("customers", FetchError::QueryError("connection reset".into()))
        .await;

    let sources = Arc::new(DataSourceRegistry::new());
    sources.register("orders-ds", Arc::new(catalog));
    let types = Arc::new(ObjectCatalog::new());
    types.register::<Customer>("example.Customer");
    let pipeline = MappingPipeline::new(sources, types, Arc::new(DescriptorStore::new()));

    let spec = MappingSpec::new("orders-ds", "customers", "example.Customer");
    let err = pipeline.run(&spec).await.unwrap_err();

    match err {
        MappingError::Database(message) => assert!(message.contains("connection reset")),
        other => panic!("expected Database, got {:?}", other),
    }
}

#[tokio::test]
async fn check_folds_failure_into_member_tagged_report() {
    let (pipeline, _) = fixture(customers_metadata()).await;
    let spec = MappingSpec::new("missing-ds", "customers", "example.Customer");

    let report = pipeline.check(&spec, "server-1").await;

    assert!(!report.is_ok());
    assert_eq!(report.member, "server-1");
    let json = report.to_json().unwrap();
    assert!(json.contains("DATA_SOURCE_NOT_FOUND"));
}

#[tokio::test]
async fn check_reports_comma_joined_inferred_keys() {
    let metadata = TableMetadata::new(
        "customers",
        vec![
            ColumnDescriptor::new("id", SqlType::Integer, false),
            ColumnDescriptor::new("name", SqlType::Varchar, true),
        ],
        vec!["id".to_string(), "name".to_string()],
    );
    let (pipeline, _) = fixture(metadata).await;
    let spec = MappingSpec::new("orders-ds", "customers", "example.Customer");

    let report = pipeline.check(&spec, "server-1").await;

    assert!(report.is_ok());
    let json = report.to_json().unwrap();
    assert!(json.contains("\"id,name\""));
}
