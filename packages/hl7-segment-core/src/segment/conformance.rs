//! Required-field and minimum-repetition checks.
//!
//! The store tracks `required` and `min_reps` but never enforces them; the
//! parser or application decides what a non-conformant segment means.

use std::fmt;

use crate::definition::FieldDescriptor;

/// One conformance problem found in a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConformanceIssue {
    /// Required field has no repetitions
    MissingRequired { label: String, name: String },
    /// Field is present with fewer repetitions than its minimum
    TooFewRepetitions {
        label: String,
        name: String,
        reps: usize,
        min: usize,
    },
}

impl fmt::Display for ConformanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConformanceIssue::MissingRequired { label, name } => {
                write!(f, "{label} ({name}) is required but missing")
            }
            ConformanceIssue::TooFewRepetitions {
                label,
                name,
                reps,
                min,
            } => write!(f, "{label} ({name}) has {reps} repetitions, needs {min}"),
        }
    }
}

/// Result of checking a segment against its definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformanceReport {
    pub segment: String,
    pub issues: Vec<ConformanceIssue>,
}

impl ConformanceReport {
    pub fn is_conformant(&self) -> bool {
        self.issues.is_empty()
    }

    /// Labels ("PID-3") of required fields without any repetition.
    pub fn missing_required(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().filter_map(|issue| match issue {
            ConformanceIssue::MissingRequired { label, .. } => Some(label.as_str()),
            _ => None,
        })
    }
}

/// Checks repetition counts against descriptors.
///
/// # Arguments
/// * `segment` - Segment name used for field labels
/// * `fields` - Field descriptors in order
/// * `reps` - Current repetition count per field index
pub(crate) fn check(
    segment: &str,
    fields: &[FieldDescriptor],
    reps: impl Fn(usize) -> usize,
) -> ConformanceReport {
    let mut issues = Vec::new();
    for field in fields {
        let count = reps(field.index);
        if count == 0 {
            if field.required {
                issues.push(ConformanceIssue::MissingRequired {
                    label: field.label(segment),
                    name: field.name.clone(),
                });
            }
        } else if count < field.min_reps {
            issues.push(ConformanceIssue::TooFewRepetitions {
                label: field.label(segment),
                name: field.name.clone(),
                reps: count,
                min: field.min_reps,
            });
        }
    }

    ConformanceReport {
        segment: segment.to_string(),
        issues,
    }
}
