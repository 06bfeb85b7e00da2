//! Read-only, shareable form of a populated segment.

use std::sync::Arc;

use crate::definition::{FieldDescriptor, SegmentDefinition};
use crate::error::SegmentError;

use super::conformance::ConformanceReport;
use super::segment::Segment;

/// Segment past its freeze point.
///
/// Cloning shares the same repetitions. No operation creates or removes a
/// repetition, so a frozen segment is `Send + Sync` whenever `V` is.
#[derive(Debug)]
pub struct FrozenSegment<V> {
    inner: Arc<Segment<V>>,
}

impl<V> Clone for FrozenSegment<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> FrozenSegment<V> {
    pub(crate) fn new(segment: Segment<V>) -> Self {
        Self {
            inner: Arc::new(segment),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn definition(&self) -> &Arc<SegmentDefinition<V>> {
        self.inner.definition()
    }

    pub fn num_fields(&self) -> usize {
        self.inner.num_fields()
    }

    pub fn descriptor(&self, field_index: usize) -> Result<&FieldDescriptor, SegmentError> {
        self.inner.descriptor(field_index)
    }

    pub fn get_reps(&self, field_index: usize) -> Result<usize, SegmentError> {
        self.inner.get_reps(field_index)
    }

    pub fn get(&self, field_index: usize, rep: usize) -> Result<Option<&V>, SegmentError> {
        self.inner.get(field_index, rep)
    }

    pub fn get_all(&self, field_index: usize) -> Result<&[V], SegmentError> {
        self.inner.get_all(field_index)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn populated_fields(&self) -> impl Iterator<Item = (usize, &[V])> {
        self.inner.populated_fields()
    }

    pub fn conformance(&self) -> ConformanceReport {
        self.inner.conformance()
    }

    /// Returns the mutable segment if this is the only handle left.
    ///
    /// # Returns
    /// `Err(self)` while other clones are alive.
    pub fn try_thaw(self) -> Result<Segment<V>, Self> {
        Arc::try_unwrap(self.inner).map_err(|inner| Self { inner })
    }
}
