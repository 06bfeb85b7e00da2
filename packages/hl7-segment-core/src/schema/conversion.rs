//! Conversion between field-table files and segment definitions.

use crate::definition::{FieldDescriptor, MaxReps, SegmentDefinition};
use crate::error::DefinitionError;
use crate::types::TypeRegistry;

use super::file::{FieldSchema, SegmentSchema};

impl SegmentSchema {
    /// Builds a segment definition, resolving every field type through the registry.
    ///
    /// # Arguments
    /// * `registry` - Constructors by datatype identifier
    ///
    /// # Returns
    /// `Result<SegmentDefinition<V>, DefinitionError>`; an unknown type or an
    /// invalid cardinality aborts the whole segment.
    pub fn to_definition<V>(
        &self,
        registry: &TypeRegistry<V>,
    ) -> Result<SegmentDefinition<V>, DefinitionError> {
        let mut builder = SegmentDefinition::builder(self.name.clone());

        for (index, field) in self.fields.iter().enumerate() {
            let position = index + 1;
            let factory =
                registry
                    .get(&field.r#type)
                    .ok_or_else(|| DefinitionError::UnknownType {
                        segment: self.name.clone(),
                        position,
                        type_id: field.r#type.clone(),
                    })?;

            let max_reps =
                MaxReps::from_raw(field.max_reps).ok_or_else(|| {
                    DefinitionError::InvalidCardinality {
                        segment: self.name.clone(),
                        position,
                        message: format!("invalid max_reps {}", field.max_reps),
                    }
                })?;

            let mut descriptor = FieldDescriptor::builder(field.name.clone(), field.r#type.clone())
                .required(field.required)
                .max_reps(max_reps)
                .max_length(field.length)
                .table(field.table.unwrap_or(0));
            if let Some(min_reps) = field.min_reps {
                descriptor = descriptor.min_reps(min_reps);
            }
            if let Some(args) = &field.args {
                descriptor = descriptor.type_args(args.clone());
            }

            builder = builder.field(descriptor, factory);
        }

        builder.build()
    }

    /// Exports a definition back to its field-table form.
    pub fn from_definition<V>(definition: &SegmentDefinition<V>) -> Self {
        let fields = definition
            .fields()
            .iter()
            .map(|field| FieldSchema {
                name: field.name.clone(),
                r#type: field.type_id.clone(),
                required: field.required,
                max_reps: field.max_reps.to_raw(),
                min_reps: Some(field.min_reps),
                length: field.max_length,
                table: field.table_number,
                args: Some(field.type_args.clone()),
            })
            .collect();

        Self {
            name: definition.name().to_string(),
            fields,
        }
    }
}
