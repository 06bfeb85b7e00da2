//! Segment definition: ordered field descriptors paired with their factories.

use std::fmt;

use super::descriptor::{FieldDescriptor, FieldDescriptorBuilder};
use super::field_ref::FieldRef;
use super::validation;
use crate::error::DefinitionError;
use crate::types::FieldFactory;

/// Immutable field table for one segment kind (e.g. "NK1").
///
/// Position in the field list is the only identity of a field. Definitions
/// are shared between segments through `Arc` and never change after
/// [`SegmentDefinitionBuilder::build`].
pub struct SegmentDefinition<V> {
    name: String,
    fields: Vec<FieldDescriptor>,
    factories: Vec<FieldFactory<V>>,
}

impl<V> fmt::Debug for SegmentDefinition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentDefinition")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<V> SegmentDefinition<V> {
    /// Starts a definition for the named segment kind.
    pub fn builder(name: impl Into<String>) -> SegmentDefinitionBuilder<V> {
        SegmentDefinitionBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Segment kind, e.g. "PID".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the descriptor at a 0-based index.
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Returns the factory at a 0-based index.
    pub fn factory(&self, index: usize) -> Option<&FieldFactory<V>> {
        self.factories.get(index)
    }

    /// Resolves an external reference to a 0-based index.
    ///
    /// Returns `None` if the reference names another segment kind or a
    /// position past the end of this definition.
    pub fn resolve(&self, field_ref: &FieldRef) -> Option<usize> {
        (field_ref.segment() == self.name && field_ref.index() < self.fields.len())
            .then(|| field_ref.index())
    }

    /// Descriptors of required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Descriptors of fields associated with a code table.
    pub fn coded_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.table_number.is_some())
    }
}

/// Builder registering fields in order, one call per field.
pub struct SegmentDefinitionBuilder<V> {
    name: String,
    fields: Vec<(FieldDescriptorBuilder, FieldFactory<V>)>,
}

impl<V> SegmentDefinitionBuilder<V> {
    /// Appends the next field.
    ///
    /// # Arguments
    /// * `field` - Descriptor for the field at the next position
    /// * `factory` - Constructor for new repetitions of this field
    pub fn field(mut self, field: FieldDescriptorBuilder, factory: FieldFactory<V>) -> Self {
        self.fields.push((field, factory));
        self
    }

    /// Validates and freezes the field table.
    ///
    /// # Returns
    /// `Result<SegmentDefinition<V>, DefinitionError>`; the first invalid
    /// field aborts construction.
    pub fn build(self) -> Result<SegmentDefinition<V>, DefinitionError> {
        validation::validate_segment_name(&self.name)?;

        let mut fields = Vec::with_capacity(self.fields.len());
        let mut factories = Vec::with_capacity(self.fields.len());
        for (index, (builder, factory)) in self.fields.into_iter().enumerate() {
            let descriptor = builder.build(index);
            validation::validate_descriptor(&self.name, &descriptor)?;
            fields.push(descriptor);
            factories.push(factory);
        }

        tracing::debug!(
            "Built segment definition {} with {} fields",
            self.name,
            fields.len()
        );

        Ok(SegmentDefinition {
            name: self.name,
            fields,
            factories,
        })
    }
}
