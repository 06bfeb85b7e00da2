//! Segment store and definition error types.

use thiserror::Error;

/// Errors returned by the segment field store.
///
/// Every variant is a contract violation by the caller (or a schema mismatch
/// in the data being fed in); none of them are transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// Field position outside `[0, num_fields)`
    #[error("Field index {index} out of range for segment '{segment}' ({num_fields} fields)")]
    InvalidFieldIndex {
        segment: String,
        index: usize,
        num_fields: usize,
    },

    /// Repetition position outside the legal range for an insert or remove
    #[error("Invalid repetition {rep} for {segment}-{field} (current repetitions: {reps})")]
    InvalidRepetitionIndex {
        segment: String,
        /// 1-based field position, as written in "PID-5"
        field: usize,
        rep: usize,
        reps: usize,
    },

    /// Operation would create more repetitions than the field allows
    #[error("Cardinality exceeded for {segment}-{field}: {requested} repetitions requested, at most {max} allowed")]
    CardinalityExceeded {
        segment: String,
        /// 1-based field position, as written in "PID-5"
        field: usize,
        requested: usize,
        max: usize,
    },
}

/// Errors raised while building segment definitions, registering types or
/// loading field-table schema files.
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// Segment definition without a name
    #[error("Segment definition has an empty name")]
    EmptySegmentName,

    /// Field descriptor without a name
    #[error("Field {position} of segment '{segment}' has an empty name")]
    EmptyFieldName { segment: String, position: usize },

    /// Inconsistent min/max repetitions or required flag
    #[error("Invalid cardinality for {segment}-{position}: {message}")]
    InvalidCardinality {
        segment: String,
        position: usize,
        message: String,
    },

    /// Field type not present in the type registry
    #[error("Unknown type '{type_id}' for {segment}-{position}")]
    UnknownType {
        segment: String,
        position: usize,
        type_id: String,
    },

    /// Type constructor registered twice
    #[error("Type '{type_id}' already registered")]
    AlreadyRegistered { type_id: String },

    /// Segment kind registered twice in a catalog
    #[error("Segment '{0}' already registered")]
    SegmentAlreadyRegistered(String),

    /// Segment kind not present in a catalog
    #[error("Segment '{segment}' not found")]
    SegmentNotFound { segment: String },

    /// Malformed field reference such as "PID-" or "PID-0"
    #[error("Invalid field reference '{0}'")]
    InvalidFieldRef(String),

    /// Schema file written for a different layout version
    #[error("Unsupported schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Schema file is not valid JSON or does not match the schema layout
    #[error("Schema parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a schema file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
