//! Field-table files: serde layout, loading, conversion into definitions.

mod conversion;
mod file;

pub use file::{FieldSchema, SchemaFile, SegmentSchema, SCHEMA_VERSION};
