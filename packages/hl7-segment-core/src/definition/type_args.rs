//! Construction parameters forwarded to field factories.

use serde::{Deserialize, Serialize};

/// One construction parameter for a field value.
///
/// The store never interprets these; they are handed to the field's factory
/// in declaration order on every construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeArg {
    /// Placeholder for the owning message context
    Message,
    /// Code table number for coded datatypes (IS, ID)
    Table(u32),
    /// Any other integer parameter
    Integer(i64),
    /// Any other text parameter
    Text(String),
}

impl TypeArg {
    /// Returns the table number if this argument carries one.
    pub fn as_table(&self) -> Option<u32> {
        match self {
            TypeArg::Table(n) => Some(*n),
            _ => None,
        }
    }
}
