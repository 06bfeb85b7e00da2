//! Field value constructors.

use std::fmt;
use std::sync::Arc;

use crate::definition::TypeArg;

/// Type alias for field constructor signature.
pub type FactoryFn<V> = dyn Fn(&[TypeArg]) -> V + Send + Sync;

/// Constructor producing a new, empty field value.
///
/// Called with the field's `type_args` every time the store materializes
/// or inserts a repetition. Cloning shares the underlying closure.
pub struct FieldFactory<V> {
    constructor: Arc<FactoryFn<V>>,
}

impl<V> FieldFactory<V> {
    /// Wraps a constructor closure.
    pub fn new(constructor: impl Fn(&[TypeArg]) -> V + Send + Sync + 'static) -> Self {
        Self {
            constructor: Arc::new(constructor),
        }
    }

    /// Builds a new value from the given construction arguments.
    pub fn create(&self, args: &[TypeArg]) -> V {
        (self.constructor)(args)
    }
}

impl<V: Default> FieldFactory<V> {
    /// Factory ignoring its arguments and returning `V::default()`.
    pub fn default_value() -> Self {
        Self::new(|_| V::default())
    }
}

impl<V> Clone for FieldFactory<V> {
    fn clone(&self) -> Self {
        Self {
            constructor: Arc::clone(&self.constructor),
        }
    }
}

impl<V> fmt::Debug for FieldFactory<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldFactory").finish_non_exhaustive()
    }
}
