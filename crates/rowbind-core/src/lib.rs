//! Rowbind Core
//!
//! Core domain model with stable, versioned types.
//! Error kind codes and the report schema are part of the public API -
//! never rename them, only add new ones.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod mapping;
pub mod report;
pub mod types;

pub use config::{Config, ConfigError, DataSourceConfig};
pub use descriptor::{ColumnDescriptor, FieldDescriptor, TypeDescriptor};
pub use error::{ErrorKind, MappingError};
pub use mapping::{FieldMapping, MappingResult, MappingSpec};
pub use report::{CheckOutcome, CheckReport, ReportVersion};
pub use types::{FieldType, SqlType};
