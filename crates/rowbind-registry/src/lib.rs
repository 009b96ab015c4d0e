//! Type descriptor registry
//!
//! This crate owns everything about object types: the process-wide
//! descriptor store, the catalog of registered type names, the declared
//! field-serialization protocol, and descriptor generation for types with
//! no cached descriptor.
//!
//! Generation tries two sources in order: the type's own declared
//! serialization, then a reflective fallback driven through serde. The
//! fallback is selected only on a typed incompatibility signal, never on
//! arbitrary failures.

pub mod capture;
pub mod generate;
pub mod object_catalog;
pub mod shape;
pub mod store;

pub use capture::DescriptorCapture;
pub use generate::{generate_descriptor, DescriptorSource};
pub use object_catalog::{ConstructError, ObjectCatalog, ObjectInstance, RegisteredType};
pub use shape::{DeclaredFields, FieldWriter, ShapeError};
pub use store::DescriptorStore;
