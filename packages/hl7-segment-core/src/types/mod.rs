//! Field constructors and the datatype registry.

mod factory;
mod type_registry;

pub use factory::{FactoryFn, FieldFactory};
pub use type_registry::TypeRegistry;
