//! Comparison strategy selection
//!
//! The result comparator validates that two evaluations of one expression
//! agree. How strictly it may compare depends on the resolved type.

use outcon_types::{InnerCategory, ResolvedType, TypeCategory};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonStrategy {
    /// Byte-for-byte equality of the rendered value
    Exact,
    /// Numeric equality within a relative tolerance
    NumericTolerance,
    /// Equality of parsed JSON documents, ignoring key order and whitespace
    JsonSemantic,
    /// Equality after normalizing interval units
    NormalizedInterval,
    /// Same length, entries compared in order
    Elementwise(Box<ComparisonStrategy>),
    /// Same bounds and inclusivity, bounds compared with the inner strategy
    RangeBounds(Box<ComparisonStrategy>),
    /// Same key set, values compared per key regardless of order
    KeyedUnordered(Box<ComparisonStrategy>),
    /// Same arity, each field with its own strategy
    Fieldwise(Vec<ComparisonStrategy>),
    /// A container whose inner category is unknown; only the rendered text
    /// can be compared
    Opaque,
}

impl ComparisonStrategy {
    /// Strategy for a value of `category` without inner parametrization
    pub fn for_category(category: TypeCategory) -> Self {
        match category {
            TypeCategory::Boolean
            | TypeCategory::Integer
            | TypeCategory::Text
            | TypeCategory::Bytea
            | TypeCategory::Uuid
            | TypeCategory::DateTime => Self::Exact,
            TypeCategory::Numeric => Self::NumericTolerance,
            TypeCategory::Interval => Self::NormalizedInterval,
            TypeCategory::Jsonb => Self::JsonSemantic,
            TypeCategory::Array
            | TypeCategory::List
            | TypeCategory::Map
            | TypeCategory::Range
            | TypeCategory::Record => Self::Opaque,
        }
    }

    /// Strategy for a resolved type, descending into its inner categories
    pub fn for_type(resolved: &ResolvedType) -> Self {
        match (resolved.category(), resolved.inner()) {
            (TypeCategory::Array | TypeCategory::List, Some(InnerCategory::Element(element))) => {
                Self::Elementwise(Box::new(Self::for_category(*element)))
            }
            (TypeCategory::Range, Some(InnerCategory::Element(element))) => {
                Self::RangeBounds(Box::new(Self::for_category(*element)))
            }
            (TypeCategory::Map, Some(InnerCategory::Value(value))) => {
                Self::KeyedUnordered(Box::new(Self::for_category(*value)))
            }
            (TypeCategory::Record, Some(InnerCategory::Fields(fields))) => {
                Self::Fieldwise(fields.iter().copied().map(Self::for_category).collect())
            }
            (category, _) => Self::for_category(category),
        }
    }

    /// Check if no part of a value needs tolerant comparison
    pub fn is_exact(&self) -> bool {
        match self {
            Self::Exact | Self::Opaque => true,
            Self::NumericTolerance | Self::JsonSemantic | Self::NormalizedInterval => false,
            Self::Elementwise(inner)
            | Self::RangeBounds(inner)
            | Self::KeyedUnordered(inner) => inner.is_exact(),
            Self::Fieldwise(fields) => fields.iter().all(Self::is_exact),
        }
    }
}

impl fmt::Display for ComparisonStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::NumericTolerance => f.write_str("numeric tolerance"),
            Self::JsonSemantic => f.write_str("json semantic"),
            Self::NormalizedInterval => f.write_str("normalized interval"),
            Self::Elementwise(inner) => write!(f, "elementwise({})", inner),
            Self::RangeBounds(inner) => write!(f, "range bounds({})", inner),
            Self::KeyedUnordered(inner) => write!(f, "keyed unordered({})", inner),
            Self::Fieldwise(fields) => {
                let fields: Vec<String> = fields.iter().map(ToString::to_string).collect();
                write!(f, "fieldwise({})", fields.join(", "))
            }
            Self::Opaque => f.write_str("opaque"),
        }
    }
}
