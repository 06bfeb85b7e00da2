//! Schema structs for field-table files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definition::TypeArg;
use crate::error::DefinitionError;

/// Current field-table file layout version.
pub const SCHEMA_VERSION: u32 = 1;

/// Field-table file holding any number of segment kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Schema version
    pub version: u32,
    /// Segment definitions
    pub segments: Vec<SegmentSchema>,
}

/// Field table of one segment kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSchema {
    /// Segment name (e.g., "NK1")
    pub name: String,
    /// Field definitions in order
    pub fields: Vec<FieldSchema>,
}

/// One field-table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field description
    pub name: String,
    /// Datatype identifier
    pub r#type: String,
    /// Required flag
    #[serde(default)]
    pub required: bool,
    /// Maximum repetitions: -1 or 0 unbounded, otherwise the bound
    #[serde(default = "default_max_reps")]
    pub max_reps: i64,
    /// Minimum repetitions (default: 1 if required, else 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_reps: Option<usize>,
    /// Maximum encoded length (0 = unspecified)
    #[serde(default)]
    pub length: usize,
    /// Code table number (0 or absent = none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<u32>,
    /// Factory arguments (default: the table number, if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<TypeArg>>,
}

fn default_max_reps() -> i64 {
    1
}

impl SchemaFile {
    /// Creates an empty schema file at the current version.
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION,
            segments: Vec::new(),
        }
    }

    /// Parses a schema file from JSON.
    ///
    /// # Returns
    /// `Err(DefinitionError::UnsupportedSchemaVersion)` for other layout versions.
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        let schema: SchemaFile = serde_json::from_str(json)?;
        if schema.version != SCHEMA_VERSION {
            return Err(DefinitionError::UnsupportedSchemaVersion {
                found: schema.version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(schema)
    }

    /// Reads and parses a schema file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let schema = Self::from_json_str(&json)?;
        tracing::debug!(
            "Loaded schema file {} with {} segments",
            path.display(),
            schema.segments.len()
        );
        Ok(schema)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the schema file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DefinitionError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Finds a segment by name.
    pub fn segment(&self, name: &str) -> Option<&SegmentSchema> {
        self.segments.iter().find(|s| s.name == name)
    }
}

impl Default for SchemaFile {
    fn default() -> Self {
        Self::new()
    }
}
