//! Catalog of segment definitions, one per segment kind.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::config::SegmentConfig;
use crate::definition::SegmentDefinition;
use crate::error::DefinitionError;
use crate::schema::SchemaFile;
use crate::segment::Segment;
use crate::types::TypeRegistry;

/// Container holding shared segment definitions by name.
///
/// Definitions are built once per segment kind and handed to every
/// [`Segment`] created from the catalog.
pub struct SegmentCatalog<V> {
    /// Map of segment name to definition
    definitions: RwLock<HashMap<String, Arc<SegmentDefinition<V>>>>,
    /// Configuration applied to created segments
    config: SegmentConfig,
}

impl<V> Default for SegmentCatalog<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for SegmentCatalog<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentCatalog")
            .field("segments", &self.segment_names())
            .field("config", &self.config)
            .finish()
    }
}

impl<V> SegmentCatalog<V> {
    /// Creates a new empty catalog with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SegmentConfig::default())
    }

    /// Creates a new empty catalog.
    pub fn with_config(config: SegmentConfig) -> Self {
        Self {
            definitions: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Registers a definition under its segment name.
    ///
    /// # Returns
    /// The shared definition, or `Err(DefinitionError::SegmentAlreadyRegistered)`.
    pub fn register(
        &self,
        definition: SegmentDefinition<V>,
    ) -> Result<Arc<SegmentDefinition<V>>, DefinitionError> {
        let mut definitions = self
            .definitions
            .write()
            .map_err(|_| DefinitionError::LockPoisoned)?;
        let name = definition.name().to_string();
        if definitions.contains_key(&name) {
            return Err(DefinitionError::SegmentAlreadyRegistered(name));
        }

        let definition = Arc::new(definition);
        definitions.insert(name.clone(), Arc::clone(&definition));
        tracing::debug!("Registered segment definition {}", name);
        Ok(definition)
    }

    /// Builds and registers every segment of a schema file.
    ///
    /// All definitions are built and checked for name clashes before any is
    /// registered, so a failing file leaves the catalog unchanged.
    ///
    /// # Returns
    /// Number of segments registered.
    pub fn load_schema(
        &self,
        schema: &SchemaFile,
        registry: &TypeRegistry<V>,
    ) -> Result<usize, DefinitionError> {
        let built = schema
            .segments
            .iter()
            .map(|segment| segment.to_definition(registry))
            .collect::<Result<Vec<_>, _>>()?;

        let mut definitions = self
            .definitions
            .write()
            .map_err(|_| DefinitionError::LockPoisoned)?;

        let mut seen = std::collections::HashSet::new();
        for definition in &built {
            let name = definition.name();
            if definitions.contains_key(name) || !seen.insert(name) {
                return Err(DefinitionError::SegmentAlreadyRegistered(name.to_string()));
            }
        }

        let count = built.len();
        for definition in built {
            definitions.insert(definition.name().to_string(), Arc::new(definition));
        }
        tracing::debug!("Registered {} segment definitions from schema", count);
        Ok(count)
    }

    /// Gets a shared definition by segment name.
    pub fn definition(&self, name: &str) -> Result<Arc<SegmentDefinition<V>>, DefinitionError> {
        let definitions = self
            .definitions
            .read()
            .map_err(|_| DefinitionError::LockPoisoned)?;
        definitions
            .get(name)
            .cloned()
            .ok_or_else(|| DefinitionError::SegmentNotFound {
                segment: name.to_string(),
            })
    }

    /// Creates an empty segment of the named kind.
    pub fn create_segment(&self, name: &str) -> Result<Segment<V>, DefinitionError> {
        let definition = self.definition(name)?;
        Ok(Segment::with_config(definition, self.config.clone()))
    }

    /// Returns all registered segment names, sorted.
    pub fn segment_names(&self) -> Vec<String> {
        let definitions = match self.definitions.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut names: Vec<String> = definitions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered segment kinds.
    pub fn len(&self) -> usize {
        self.definitions.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
