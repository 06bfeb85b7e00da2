//! Field descriptor within a segment definition.

use super::cardinality::MaxReps;
use super::type_args::TypeArg;

/// Field descriptor within a segment definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Zero-based position within the segment
    pub index: usize,
    /// Field description (e.g., "Patient Name")
    pub name: String,
    /// Datatype identifier (e.g., "XPN", "CWE_ELR")
    pub type_id: String,
    /// Whether at least one repetition must eventually be present
    pub required: bool,
    /// Minimum repetitions once the field is present
    pub min_reps: usize,
    /// Maximum repetitions
    pub max_reps: MaxReps,
    /// Maximum encoded length (0 = unspecified)
    pub max_length: usize,
    /// Code table the field's values are drawn from
    pub table_number: Option<u32>,
    /// Parameters forwarded verbatim to the field factory
    pub type_args: Vec<TypeArg>,
}

impl FieldDescriptor {
    /// Starts a descriptor for a field of the given type.
    ///
    /// # Arguments
    /// * `name` - Field description
    /// * `type_id` - Datatype identifier
    ///
    /// # Returns
    /// A builder defaulting to an optional, non-repeating field without a table.
    pub fn builder(name: impl Into<String>, type_id: impl Into<String>) -> FieldDescriptorBuilder {
        FieldDescriptorBuilder::new(name, type_id)
    }

    /// Returns the 1-based position used in external references ("PID-5" is index 4).
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Returns the external label of this field, e.g. `PID-5`.
    pub fn label(&self, segment: &str) -> String {
        format!("{}-{}", segment, self.position())
    }

    /// Returns `true` if the field may hold more than one repetition.
    pub fn is_repeating(&self) -> bool {
        self.max_reps.is_repeating()
    }
}

/// Builder for [`FieldDescriptor`]; the index is assigned by the segment
/// definition builder from declaration order.
#[derive(Debug, Clone)]
pub struct FieldDescriptorBuilder {
    name: String,
    type_id: String,
    required: bool,
    min_reps: Option<usize>,
    max_reps: MaxReps,
    max_length: usize,
    table_number: Option<u32>,
    type_args: Option<Vec<TypeArg>>,
}

impl FieldDescriptorBuilder {
    fn new(name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: type_id.into(),
            required: false,
            min_reps: None,
            max_reps: MaxReps::SINGLE,
            max_length: 0,
            table_number: None,
            type_args: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Overrides the minimum repetitions (default: 1 if required, else 0).
    pub fn min_reps(mut self, min_reps: usize) -> Self {
        self.min_reps = Some(min_reps);
        self
    }

    pub fn max_reps(mut self, max_reps: MaxReps) -> Self {
        self.max_reps = max_reps;
        self
    }

    pub fn repeating(self) -> Self {
        self.max_reps(MaxReps::Unbounded)
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Associates a code table; table 0 means no table.
    pub fn table(mut self, table_number: u32) -> Self {
        self.table_number = (table_number != 0).then_some(table_number);
        self
    }

    /// Sets the factory arguments explicitly.
    ///
    /// Without this, a field with a table gets `[TypeArg::Table(n)]` and any
    /// other field gets no arguments.
    pub fn type_args(mut self, type_args: Vec<TypeArg>) -> Self {
        self.type_args = Some(type_args);
        self
    }

    pub(crate) fn build(self, index: usize) -> FieldDescriptor {
        let min_reps = self.min_reps.unwrap_or(usize::from(self.required));
        let type_args = self.type_args.unwrap_or_else(|| {
            self.table_number
                .map(|n| vec![TypeArg::Table(n)])
                .unwrap_or_default()
        });

        FieldDescriptor {
            index,
            name: self.name,
            type_id: self.type_id,
            required: self.required,
            min_reps,
            max_reps: self.max_reps,
            max_length: self.max_length,
            table_number: self.table_number,
            type_args,
        }
    }
}
