//! External field references such as `PID-5`.

use std::fmt;
use std::str::FromStr;

use crate::error::DefinitionError;

/// Reference to a field by segment name and 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    segment: String,
    position: usize,
}

impl FieldRef {
    /// Creates a reference from a segment name and a 1-based position.
    ///
    /// # Returns
    /// `Err(DefinitionError::InvalidFieldRef)` for position 0 or an empty segment name.
    pub fn new(segment: impl Into<String>, position: usize) -> Result<Self, DefinitionError> {
        let segment = segment.into();
        if segment.is_empty() || position == 0 {
            return Err(DefinitionError::InvalidFieldRef(format!(
                "{}-{}",
                segment, position
            )));
        }
        Ok(Self { segment, position })
    }

    /// Parses `SEG-N`, e.g. `NK1-3`.
    pub fn parse(reference: &str) -> Result<Self, DefinitionError> {
        let invalid = || DefinitionError::InvalidFieldRef(reference.to_string());

        let (segment, position) = reference.trim().split_once('-').ok_or_else(invalid)?;
        if !segment.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
        let position: usize = position.parse().map_err(|_| invalid())?;
        Self::new(segment, position).map_err(|_| invalid())
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// 1-based position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// 0-based field index.
    pub fn index(&self) -> usize {
        self.position - 1
    }
}

impl FromStr for FieldRef {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.segment, self.position)
    }
}
