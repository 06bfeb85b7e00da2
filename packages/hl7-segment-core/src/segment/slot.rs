//! Per-field repetition storage.

use std::collections::TryReserveError;

/// Ordered repetitions of one field; index 0 is the first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionSlot<V> {
    reps: Vec<V>,
}

impl<V> Default for RepetitionSlot<V> {
    fn default() -> Self {
        Self { reps: Vec::new() }
    }
}

impl<V> RepetitionSlot<V> {
    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.reps
    }

    pub fn get(&self, rep: usize) -> Option<&V> {
        self.reps.get(rep)
    }

    /// Returns repetition `rep`, first appending values from `make` until it exists.
    ///
    /// `initial_capacity` is only used when the slot has never held a value.
    /// Storage for every missing repetition is reserved before the first one
    /// is created; if it cannot be, the slot is left unchanged.
    pub(crate) fn get_or_fill(
        &mut self,
        rep: usize,
        initial_capacity: usize,
        mut make: impl FnMut() -> V,
    ) -> Result<&mut V, TryReserveError> {
        let len = self.reps.len();
        if rep >= len {
            let needed = rep.saturating_add(1);
            let additional = if self.reps.capacity() == 0 {
                initial_capacity.max(needed)
            } else {
                needed - len
            };
            self.reps.try_reserve(additional)?;
            while self.reps.len() <= rep {
                self.reps.push(make());
            }
        }
        Ok(&mut self.reps[rep])
    }

    /// Inserts at `rep`, shifting later repetitions up. Caller checks `rep <= len`.
    pub(crate) fn insert(&mut self, rep: usize, value: V) -> &mut V {
        self.reps.insert(rep, value);
        &mut self.reps[rep]
    }

    /// Removes at `rep`, shifting later repetitions down. Caller checks `rep < len`.
    pub(crate) fn remove(&mut self, rep: usize) -> V {
        self.reps.remove(rep)
    }

    pub(crate) fn take(&mut self) -> Vec<V> {
        std::mem::take(&mut self.reps)
    }
}
