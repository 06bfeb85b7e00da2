//! Segment store configuration.

/// Segment store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentConfig {
    /// Capacity reserved for a field's repetition slot when it is first materialized
    pub initial_rep_capacity: usize,
    /// Upper bound applied to fields declared as unbounded (default: unlimited)
    pub max_unbounded_reps: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            initial_rep_capacity: 1,
            max_unbounded_reps: usize::MAX,
        }
    }
}
