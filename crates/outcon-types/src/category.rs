//! Type categories
//!
//! `TypeCategory` only has concrete values. The "not yet resolved" state of a
//! blueprint lives in `DeclaredCategory` and `CategorySlot`, so it can never be
//! produced as the outcome of a resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The concrete category of a value produced by an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    // === Scalars ===
    Boolean,
    /// Integral numbers (smallint, int, bigint)
    Integer,
    /// Non-integral or arbitrary precision numbers
    Numeric,
    Text,
    Bytea,
    Uuid,
    /// Dates, times and timestamps
    DateTime,
    Interval,
    Jsonb,

    // === Containers ===
    Array,
    List,
    Map,
    Range,
    Record,
}

impl TypeCategory {
    /// Every category, scalars first
    pub const ALL: [TypeCategory; 14] = [
        Self::Boolean,
        Self::Integer,
        Self::Numeric,
        Self::Text,
        Self::Bytea,
        Self::Uuid,
        Self::DateTime,
        Self::Interval,
        Self::Jsonb,
        Self::Array,
        Self::List,
        Self::Map,
        Self::Range,
        Self::Record,
    ];

    /// Check if values of this category carry an inner category
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Array | Self::List | Self::Map | Self::Range | Self::Record
        )
    }

    /// Check if this is a numeric category
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Numeric)
    }

    /// Check if this category has a total order usable as a range bound
    pub fn is_ordered(&self) -> bool {
        matches!(self, Self::Integer | Self::Numeric | Self::DateTime)
    }

    /// Check if this container is parametrized by a single element category
    pub fn has_element(&self) -> bool {
        matches!(self, Self::Array | Self::List | Self::Range)
    }

    /// Upper-case name, as it appears in blueprints and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Integer => "INTEGER",
            Self::Numeric => "NUMERIC",
            Self::Text => "TEXT",
            Self::Bytea => "BYTEA",
            Self::Uuid => "UUID",
            Self::DateTime => "DATE_TIME",
            Self::Interval => "INTERVAL",
            Self::Jsonb => "JSONB",
            Self::Array => "ARRAY",
            Self::List => "LIST",
            Self::Map => "MAP",
            Self::Range => "RANGE",
            Self::Record => "RECORD",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The category a specification declares before any call-site evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredCategory {
    /// Fixed by the operation itself
    Known(TypeCategory),
    /// Depends on the category of an argument at the call site
    Dynamic,
}

impl fmt::Display for DeclaredCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(category) => write!(f, "{}", category),
            Self::Dynamic => f.write_str("DYNAMIC"),
        }
    }
}

/// An inner category slot of a container blueprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySlot {
    /// Declared by the operation
    Fixed(TypeCategory),
    /// Copied from the resolved category of the argument at this position
    FromArgument(usize),
}

impl CategorySlot {
    pub fn fixed(category: TypeCategory) -> Self {
        Self::Fixed(category)
    }

    pub fn argument(index: usize) -> Self {
        Self::FromArgument(index)
    }

    /// The argument position this slot depends on, if any
    pub fn required_index(&self) -> Option<usize> {
        match self {
            Self::Fixed(_) => None,
            Self::FromArgument(index) => Some(*index),
        }
    }
}

impl From<TypeCategory> for CategorySlot {
    fn from(category: TypeCategory) -> Self {
        Self::Fixed(category)
    }
}

impl fmt::Display for CategorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(category) => write!(f, "{}", category),
            Self::FromArgument(index) => write!(f, "${}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_classification() {
        let containers: Vec<_> = TypeCategory::ALL
            .into_iter()
            .filter(TypeCategory::is_container)
            .collect();
        assert_eq!(
            containers,
            vec![
                TypeCategory::Array,
                TypeCategory::List,
                TypeCategory::Map,
                TypeCategory::Range,
                TypeCategory::Record
            ]
        );
        assert!(!TypeCategory::Jsonb.is_container());
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(CategorySlot::argument(2).to_string(), "$2");
        assert_eq!(CategorySlot::fixed(TypeCategory::Uuid).to_string(), "UUID");
        assert_eq!(DeclaredCategory::Dynamic.to_string(), "DYNAMIC");
        assert_eq!(DeclaredCategory::Known(TypeCategory::Map).to_string(), "MAP");
    }
}
