//! Rowbind engine - the mapping check itself
//!
//! This crate implements the mapping precondition check:
//! - Structural validation (column/field count)
//! - Two-pass column-to-field matching
//! - Key column inference
//! - The pipeline that sequences them

pub mod keys;
pub mod matcher;
pub mod pipeline;
pub mod validate;

pub use keys::resolve_key_columns;
pub use matcher::match_column;
pub use pipeline::MappingPipeline;
pub use validate::validate_field_counts;
