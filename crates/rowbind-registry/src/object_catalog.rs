//! Catalog of registered object types

use crate::shape::{DeclaredFields, FieldWriter, ShapeError};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Why a registered constructor failed to produce an instance
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ConstructError(pub String);

/// A default-constructed instance used only to discover field layout
///
/// The instance is throwaway: it exists so the generator can drive the
/// type's declared serialization, or render it reflectively, and is
/// discarded afterwards.
pub trait ObjectInstance: Send + Sync {
    /// Drive the type's declared field serialization against a writer
    fn write_fields(&self, writer: &mut dyn FieldWriter) -> Result<(), ShapeError>;

    /// Render the instance as a JSON value for reflective field discovery
    fn reflect(&self) -> Result<serde_json::Value, ShapeError>;
}

struct DeclaredInstance<T>(T);

impl<T> ObjectInstance for DeclaredInstance<T>
where
    T: DeclaredFields + Serialize + Send + Sync,
{
    fn write_fields(&self, writer: &mut dyn FieldWriter) -> Result<(), ShapeError> {
        self.0.write_fields(writer)
    }

    fn reflect(&self) -> Result<serde_json::Value, ShapeError> {
        serde_json::to_value(&self.0).map_err(|e| ShapeError::Reflection(e.to_string()))
    }
}

struct SerdeInstance<T>(T);

impl<T> ObjectInstance for SerdeInstance<T>
where
    T: Serialize + Send + Sync,
{
    fn write_fields(&self, _writer: &mut dyn FieldWriter) -> Result<(), ShapeError> {
        Err(ShapeError::Incompatible(
            "the type does not declare its field serialization".to_string(),
        ))
    }

    fn reflect(&self) -> Result<serde_json::Value, ShapeError> {
        serde_json::to_value(&self.0).map_err(|e| ShapeError::Reflection(e.to_string()))
    }
}

type Constructor = Box<dyn Fn() -> Result<Box<dyn ObjectInstance>, ConstructError> + Send + Sync>;

/// One registered object type: a name bound to a default constructor
pub struct RegisteredType {
    name: String,
    construct: Constructor,
}

impl RegisteredType {
    /// The registered type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct a throwaway default instance
    pub fn construct_default(&self) -> Result<Box<dyn ObjectInstance>, ConstructError> {
        (self.construct)()
    }
}

/// Registry of object types, keyed by name
///
/// This is the type-resolution step of descriptor generation: a name that
/// is not in the catalog cannot be described at all.
#[derive(Default)]
pub struct ObjectCatalog {
    types: RwLock<HashMap<String, Arc<RegisteredType>>>,
}

impl ObjectCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<RegisteredType>>> {
        match self.types.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<RegisteredType>>> {
        match self.types.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a type with a declared field serialization
    pub fn register<T>(&self, name: impl Into<String>)
    where
        T: Default + DeclaredFields + Serialize + Send + Sync + 'static,
    {
        self.register_with(name, || Ok(Box::new(DeclaredInstance(T::default()))));
    }

    /// Register a type described only through serde
    ///
    /// The declared path reports incompatible for these types, so descriptor
    /// generation always goes through the reflective fallback.
    pub fn register_serde<T>(&self, name: impl Into<String>)
    where
        T: Default + Serialize + Send + Sync + 'static,
    {
        self.register_with(name, || Ok(Box::new(SerdeInstance(T::default()))));
    }

    /// Register a type with a custom, possibly fallible constructor
    pub fn register_with(
        &self,
        name: impl Into<String>,
        construct: impl Fn() -> Result<Box<dyn ObjectInstance>, ConstructError> + Send + Sync + 'static,
    ) {
        let name = name.into();
        let registered = RegisteredType {
            name: name.clone(),
            construct: Box::new(construct),
        };
        self.write().insert(name, Arc::new(registered));
    }

    /// Resolve a type name to its registered entry
    pub fn load(&self, name: &str) -> Option<Arc<RegisteredType>> {
        self.read().get(name).cloned()
    }

    /// Registered type names, unordered
    pub fn type_names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::DescriptorCapture;
    use serde::Serialize;

    #[derive(Default, Serialize)]
    struct Plain {
        id: i64,
        name: String,
    }

    #[derive(Default, Serialize)]
    struct Declared {
        id: i32,
    }

    impl DeclaredFields for Declared {
        fn write_fields(&self, writer: &mut dyn FieldWriter) -> Result<(), ShapeError> {
            writer.write_int("id", self.id)
        }
    }

    #[test]
    fn load_unknown_type_is_none() {
        let catalog = ObjectCatalog::new();
        assert!(catalog.load("example.Missing").is_none());
    }

    #[test]
    fn serde_registration_reports_incompatible_on_declared_path() {
        let catalog = ObjectCatalog::new();
        catalog.register_serde::<Plain>("example.Plain");

        let instance = catalog
            .load("example.Plain")
            .unwrap()
            .construct_default()
            .unwrap();

        let mut capture = DescriptorCapture::new("example.Plain");
        let result = instance.write_fields(&mut capture);
        assert!(matches!(result, Err(ShapeError::Incompatible(_))));

        let reflected = instance.reflect().unwrap();
        assert!(reflected.is_object());
    }

    #[test]
    fn declared_registration_writes_through() {
        let catalog = ObjectCatalog::new();
        catalog.register::<Declared>("example.Declared");

        let instance = catalog
            .load("example.Declared")
            .unwrap()
            .construct_default()
            .unwrap();

        let mut capture = DescriptorCapture::new("example.Declared");
        instance.write_fields(&mut capture).unwrap();
        assert_eq!(capture.finish().field_names(), vec!["id"]);
    }

    #[test]
    fn custom_constructor_can_fail() {
        let catalog = ObjectCatalog::new();
        catalog.register_with("example.NoCtor", || {
            Err(ConstructError(
                "no public zero-argument constructor".to_string(),
            ))
        });

        let result = catalog.load("example.NoCtor").unwrap().construct_default();
        assert!(result.is_err());
    }
}
