//! Repetition limits for a field.

use std::fmt;

/// Maximum number of repetitions a field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxReps {
    /// Hard upper bound on repetitions (`Bounded(1)` is a non-repeating field)
    Bounded(usize),
    /// Arbitrarily repeating
    Unbounded,
}

impl MaxReps {
    /// Non-repeating field.
    pub const SINGLE: MaxReps = MaxReps::Bounded(1);

    /// Converts the integer encoding used by generated field tables.
    ///
    /// `-1` and `0` both mean unbounded, any positive value is a bound.
    /// Anything below `-1` is not a valid encoding.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            -1 | 0 => Some(MaxReps::Unbounded),
            n if n > 0 => usize::try_from(n).ok().map(MaxReps::Bounded),
            _ => None,
        }
    }

    /// Inverse of [`MaxReps::from_raw`]; unbounded encodes as `-1`.
    pub fn to_raw(self) -> i64 {
        match self {
            MaxReps::Bounded(n) => i64::try_from(n).unwrap_or(i64::MAX),
            MaxReps::Unbounded => -1,
        }
    }

    /// Returns the bound, or `None` for unbounded fields.
    pub fn limit(self) -> Option<usize> {
        match self {
            MaxReps::Bounded(n) => Some(n),
            MaxReps::Unbounded => None,
        }
    }

    /// Returns `true` if more than one repetition is allowed.
    pub fn is_repeating(self) -> bool {
        !matches!(self, MaxReps::Bounded(0) | MaxReps::Bounded(1))
    }

    /// Returns `true` if a field may hold `count` repetitions.
    pub fn allows(self, count: usize) -> bool {
        match self {
            MaxReps::Bounded(n) => count <= n,
            MaxReps::Unbounded => true,
        }
    }
}

impl fmt::Display for MaxReps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxReps::Bounded(n) => write!(f, "{n}"),
            MaxReps::Unbounded => f.write_str("*"),
        }
    }
}
