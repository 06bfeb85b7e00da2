//! Validation of segment definitions at construction time.

use super::cardinality::MaxReps;
use super::descriptor::FieldDescriptor;
use crate::error::DefinitionError;

/// Validates a segment name.
pub(crate) fn validate_segment_name(name: &str) -> Result<(), DefinitionError> {
    if name.trim().is_empty() {
        return Err(DefinitionError::EmptySegmentName);
    }
    Ok(())
}

/// Validates a single field descriptor.
///
/// # Arguments
/// * `segment` - Owning segment name, for error reporting
/// * `field` - Field descriptor to validate
///
/// # Returns
/// `Result<(), DefinitionError>` indicating success or validation failure.
pub(crate) fn validate_descriptor(
    segment: &str,
    field: &FieldDescriptor,
) -> Result<(), DefinitionError> {
    if field.name.trim().is_empty() {
        return Err(DefinitionError::EmptyFieldName {
            segment: segment.to_string(),
            position: field.position(),
        });
    }

    let invalid = |message: String| DefinitionError::InvalidCardinality {
        segment: segment.to_string(),
        position: field.position(),
        message,
    };

    if field.max_reps == MaxReps::Bounded(0) {
        return Err(invalid("maximum repetitions must be positive".to_string()));
    }

    if !field.max_reps.allows(field.min_reps) {
        return Err(invalid(format!(
            "minimum repetitions {} exceeds maximum {}",
            field.min_reps, field.max_reps
        )));
    }

    if field.required && field.min_reps == 0 {
        return Err(invalid(
            "required field must allow at least one repetition as its minimum".to_string(),
        ));
    }

    Ok(())
}
