//! Generic field store for HL7 v2 segments.
//!
//! Provides field-table definitions with per-field cardinality, a datatype
//! registry of field constructors, lazy repetition storage with positional
//! insert/remove, and field-table file loading.

pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;
pub mod schema;
pub mod segment;
pub mod types;

pub use catalog::SegmentCatalog;
pub use config::SegmentConfig;
pub use definition::{FieldDescriptor, FieldRef, MaxReps, SegmentDefinition, TypeArg};
pub use error::{DefinitionError, SegmentError};
pub use segment::{FrozenSegment, Segment};
pub use types::{FieldFactory, TypeRegistry};
