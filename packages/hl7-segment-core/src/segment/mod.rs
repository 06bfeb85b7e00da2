//! Segment field store: per-field repetitions, cardinality, lazy creation.

mod conformance;
mod frozen;
#[allow(clippy::module_inception)]
mod segment;
mod slot;

pub use conformance::{ConformanceIssue, ConformanceReport};
pub use frozen::FrozenSegment;
pub use segment::Segment;
pub use slot::RepetitionSlot;
