use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use super::factory::FieldFactory;
use crate::definition::TypeArg;
use crate::error::DefinitionError;

/// Registry of field constructors keyed by datatype identifier.
///
/// Used to turn field tables loaded from schema files ("XPN", "CWE_ELR", ...)
/// into factory-backed segment definitions. Provides thread-safe
/// registration and retrieval.
pub struct TypeRegistry<V> {
    types: RwLock<HashMap<String, FieldFactory<V>>>,
}

impl<V> Default for TypeRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for TypeRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("type_ids", &self.type_ids())
            .finish()
    }
}

impl<V> TypeRegistry<V> {
    /// Creates a new empty type registry.
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a constructor for a datatype.
    ///
    /// # Arguments
    /// * `type_id` - Datatype identifier
    /// * `factory` - Constructor for values of this datatype
    ///
    /// # Returns
    /// `Ok(())` if successful, `Err(DefinitionError)` if the type is already registered.
    pub fn register(
        &self,
        type_id: impl Into<String>,
        factory: FieldFactory<V>,
    ) -> Result<(), DefinitionError> {
        let type_id = type_id.into();
        let mut types = self
            .types
            .write()
            .map_err(|_| DefinitionError::LockPoisoned)?;

        if types.contains_key(&type_id) {
            return Err(DefinitionError::AlreadyRegistered { type_id });
        }

        types.insert(type_id, factory);
        Ok(())
    }

    /// Registers a constructor closure for a datatype.
    pub fn register_fn(
        &self,
        type_id: impl Into<String>,
        constructor: impl Fn(&[TypeArg]) -> V + Send + Sync + 'static,
    ) -> Result<(), DefinitionError> {
        self.register(type_id, FieldFactory::new(constructor))
    }

    /// Retrieves a constructor by datatype identifier.
    ///
    /// # Returns
    /// `Some(FieldFactory)` if found, `None` otherwise.
    pub fn get(&self, type_id: &str) -> Option<FieldFactory<V>> {
        let types = self.types.read().ok()?;
        types.get(type_id).cloned()
    }

    /// Checks if a datatype is registered.
    pub fn contains(&self, type_id: &str) -> bool {
        let types = match self.types.read() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        types.contains_key(type_id)
    }

    /// Returns all registered datatype identifiers, sorted.
    pub fn type_ids(&self) -> Vec<String> {
        let types = match self.types.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut ids: Vec<String> = types.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Removes a datatype registration.
    ///
    /// # Returns
    /// `true` if the type was removed, `false` if it wasn't found.
    pub fn remove(&self, type_id: &str) -> bool {
        let mut types = match self.types.write() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        types.remove(type_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.types.read().map(|types| types.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Default> TypeRegistry<V> {
    /// Registers `V::default()` as the constructor for every listed datatype
    /// not yet registered.
    pub fn register_defaults<'a>(
        &self,
        type_ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), DefinitionError> {
        for type_id in type_ids {
            if !self.contains(type_id) {
                self.register(type_id, FieldFactory::default_value())?;
            }
        }
        Ok(())
    }
}
