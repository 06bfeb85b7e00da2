//! Segment definitions: field descriptors, cardinality, factory arguments.

mod cardinality;
mod descriptor;
mod field_ref;
mod segment_definition;
mod type_args;
pub(crate) mod validation;

pub use cardinality::MaxReps;
pub use descriptor::{FieldDescriptor, FieldDescriptorBuilder};
pub use field_ref::FieldRef;
pub use segment_definition::{SegmentDefinition, SegmentDefinitionBuilder};
pub use type_args::TypeArg;
