//! Segment field store.
//!
//! Each segment has:
//! - A shared, immutable definition (field descriptors + factories)
//! - One repetition slot per field, empty until accessed or inserted into
//! - A configuration applying limits to unbounded fields

use std::sync::Arc;

use crate::config::SegmentConfig;
use crate::definition::{FieldDescriptor, FieldRef, MaxReps, SegmentDefinition};
use crate::error::SegmentError;
use crate::types::FieldFactory;

use super::conformance::{self, ConformanceReport};
use super::frozen::FrozenSegment;
use super::slot::RepetitionSlot;

/// Repetition storage for one segment instance.
///
/// Mutation requires exclusive access; share a populated segment across
/// threads with [`Segment::freeze`]. Every failing call returns before
/// touching any slot.
#[derive(Debug)]
pub struct Segment<V> {
    definition: Arc<SegmentDefinition<V>>,
    slots: Vec<RepetitionSlot<V>>,
    config: SegmentConfig,
}

impl<V> Segment<V> {
    /// Creates an empty segment with the default configuration.
    pub fn new(definition: Arc<SegmentDefinition<V>>) -> Self {
        Self::with_config(definition, SegmentConfig::default())
    }

    /// Creates an empty segment.
    ///
    /// # Arguments
    /// * `definition` - Shared field table for this segment kind
    /// * `config` - Store limits
    pub fn with_config(definition: Arc<SegmentDefinition<V>>, config: SegmentConfig) -> Self {
        let slots = std::iter::repeat_with(RepetitionSlot::default)
            .take(definition.len())
            .collect();
        Self {
            definition,
            slots,
            config,
        }
    }

    /// Segment kind, e.g. "NK1".
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &Arc<SegmentDefinition<V>> {
        &self.definition
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Number of fields in the definition.
    pub fn num_fields(&self) -> usize {
        self.slots.len()
    }

    /// Returns the descriptor of a field.
    pub fn descriptor(&self, field_index: usize) -> Result<&FieldDescriptor, SegmentError> {
        self.definition
            .field(field_index)
            .ok_or_else(|| self.invalid_field(field_index))
    }

    /// Returns the number of materialized repetitions of a field.
    ///
    /// Does not create a repetition: a field never accessed or inserted into
    /// reports zero.
    pub fn get_reps(&self, field_index: usize) -> Result<usize, SegmentError> {
        self.slot(field_index).map(RepetitionSlot::len)
    }

    /// Returns repetition `rep` of a field, creating it if necessary.
    ///
    /// If `rep` is beyond the current count, repetitions are created up to and
    /// including `rep` with the field's factory, so no gaps remain. The
    /// returned borrow aliases the stored value.
    ///
    /// # Returns
    /// `Err(SegmentError::CardinalityExceeded)` if `rep + 1` repetitions are
    /// more than the field allows; nothing is created in that case.
    pub fn get_field(&mut self, field_index: usize, rep: usize) -> Result<&mut V, SegmentError> {
        let current = self.get_reps(field_index)?;
        if rep >= current {
            let requested = rep.checked_add(1).unwrap_or(usize::MAX);
            self.check_cardinality(field_index, requested)?;
            tracing::trace!(
                "Materializing {} repetition(s) of {}-{}",
                requested - current,
                self.definition.name(),
                field_index + 1
            );
        }

        let definition = &self.definition;
        let (Some(descriptor), Some(factory)) =
            (definition.field(field_index), definition.factory(field_index))
        else {
            return Err(self.invalid_field(field_index));
        };
        let max = self.max_reps(descriptor);
        let segment = definition.name();
        let slot = &mut self.slots[field_index];
        slot.get_or_fill(rep, self.config.initial_rep_capacity, || {
            factory.create(&descriptor.type_args)
        })
        .map_err(|_| SegmentError::CardinalityExceeded {
            segment: segment.to_string(),
            field: descriptor.position(),
            requested: rep.saturating_add(1),
            max,
        })
    }

    /// Returns repetition `rep` of a field if it exists, without creating it.
    pub fn get(&self, field_index: usize, rep: usize) -> Result<Option<&V>, SegmentError> {
        self.slot(field_index).map(|slot| slot.get(rep))
    }

    /// Returns all materialized repetitions of a field in order.
    ///
    /// Does not create a repetition; a field never accessed yields an empty slice.
    pub fn get_all(&self, field_index: usize) -> Result<&[V], SegmentError> {
        self.slot(field_index).map(RepetitionSlot::as_slice)
    }

    /// Inserts a new repetition at `rep`, shifting later repetitions up.
    ///
    /// # Arguments
    /// * `field_index` - 0-based field index
    /// * `rep` - Position in `[0, current count]`; the count appends
    ///
    /// # Returns
    /// The new factory-built value, for the caller to populate.
    pub fn insert_repetition(
        &mut self,
        field_index: usize,
        rep: usize,
    ) -> Result<&mut V, SegmentError> {
        let current = self.get_reps(field_index)?;
        self.check_cardinality(field_index, current.saturating_add(1))?;
        if rep > current {
            return Err(self.invalid_rep(field_index, rep, current));
        }

        let value = self.create_value(field_index)?;
        Ok(self.slots[field_index].insert(rep, value))
    }

    /// Removes and returns repetition `rep`, shifting later repetitions down.
    pub fn remove_repetition(&mut self, field_index: usize, rep: usize) -> Result<V, SegmentError> {
        let current = self.get_reps(field_index)?;
        if rep >= current {
            return Err(self.invalid_rep(field_index, rep, current));
        }
        Ok(self.slots[field_index].remove(rep))
    }

    /// Returns the constructor used for new repetitions of a field.
    pub fn type_factory_for(&self, field_index: usize) -> Result<&FieldFactory<V>, SegmentError> {
        self.definition
            .factory(field_index)
            .ok_or_else(|| self.invalid_field(field_index))
    }

    /// Builds a fresh value for a field without storing it.
    pub fn create_value(&self, field_index: usize) -> Result<V, SegmentError> {
        let descriptor = self.descriptor(field_index)?;
        let factory = self.type_factory_for(field_index)?;
        Ok(factory.create(&descriptor.type_args))
    }

    /// Resolves a `SEG-N` reference against this segment's definition.
    pub fn resolve(&self, field_ref: &FieldRef) -> Result<usize, SegmentError> {
        self.definition
            .resolve(field_ref)
            .ok_or_else(|| self.invalid_field(field_ref.index()))
    }

    /// Removes every repetition of one field.
    ///
    /// # Returns
    /// The removed repetitions in order.
    pub fn clear_field(&mut self, field_index: usize) -> Result<Vec<V>, SegmentError> {
        self.slot(field_index)?;
        Ok(self.slots[field_index].take())
    }

    /// Removes every repetition of every field.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.take();
        }
    }

    /// Returns `true` if no field holds a repetition.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(RepetitionSlot::is_empty)
    }

    /// Iterates `(field_index, repetitions)` for fields holding at least one repetition.
    pub fn populated_fields(&self) -> impl Iterator<Item = (usize, &[V])> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(index, slot)| (index, slot.as_slice()))
    }

    /// Checks required fields and minimum repetitions.
    pub fn conformance(&self) -> ConformanceReport {
        conformance::check(self.definition.name(), self.definition.fields(), |i| {
            self.slots.get(i).map_or(0, RepetitionSlot::len)
        })
    }

    /// Ends the mutable phase; the frozen segment can be shared read-only.
    pub fn freeze(self) -> FrozenSegment<V> {
        FrozenSegment::new(self)
    }

    fn slot(&self, field_index: usize) -> Result<&RepetitionSlot<V>, SegmentError> {
        self.slots
            .get(field_index)
            .ok_or_else(|| self.invalid_field(field_index))
    }

    /// Effective upper bound: the declared bound, or the configured cap for
    /// unbounded fields, never more than a `Vec<V>` can address.
    fn max_reps(&self, descriptor: &FieldDescriptor) -> usize {
        let declared = match descriptor.max_reps {
            MaxReps::Bounded(n) => n,
            MaxReps::Unbounded => self.config.max_unbounded_reps,
        };
        declared.min(addressable_reps::<V>())
    }

    fn check_cardinality(&self, field_index: usize, requested: usize) -> Result<(), SegmentError> {
        let descriptor = self.descriptor(field_index)?;
        let max = self.max_reps(descriptor);
        if requested > max {
            return Err(SegmentError::CardinalityExceeded {
                segment: self.name().to_string(),
                field: descriptor.position(),
                requested,
                max,
            });
        }
        Ok(())
    }

    fn invalid_field(&self, index: usize) -> SegmentError {
        SegmentError::InvalidFieldIndex {
            segment: self.name().to_string(),
            index,
            num_fields: self.slots.len(),
        }
    }

    fn invalid_rep(&self, field_index: usize, rep: usize, reps: usize) -> SegmentError {
        SegmentError::InvalidRepetitionIndex {
            segment: self.name().to_string(),
            field: field_index + 1,
            rep,
            reps,
        }
    }
}

/// Largest repetition count whose storage fits in `isize::MAX` bytes.
fn addressable_reps<V>() -> usize {
    isize::MAX as usize / std::mem::size_of::<V>().max(1)
}

impl<V: Clone> Clone for Segment<V> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            slots: self.slots.clone(),
            config: self.config.clone(),
        }
    }
}
