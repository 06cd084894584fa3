//! Resolved types
//!
//! A `ResolvedType` is produced fresh by one resolution call and owned by the
//! caller. Container categories carry their inner parametrization next to the
//! outer category instead of inside it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{InvalidResolutionState, ResolutionResult, StateViolation, TypeCategory};

/// Inner parametrization of a container category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnerCategory {
    /// Element category of an array, list or range
    Element(TypeCategory),
    /// Value category of a map (keys are always text)
    Value(TypeCategory),
    /// Field categories of a record, by position
    Fields(Vec<TypeCategory>),
}

/// The concrete outcome of resolving a specification for one call site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ResolvedTypeRepr", into = "ResolvedTypeRepr")]
pub struct ResolvedType {
    category: TypeCategory,
    inner: Option<InnerCategory>,
}

impl ResolvedType {
    // === Constructors ===

    /// A category without inner parametrization
    ///
    /// For container categories this is an opaque container whose inner
    /// category is unknown; inner accessors on it fail.
    pub fn new(category: TypeCategory) -> Self {
        Self {
            category,
            inner: None,
        }
    }

    pub fn array_of(element: TypeCategory) -> Self {
        Self {
            category: TypeCategory::Array,
            inner: Some(InnerCategory::Element(element)),
        }
    }

    pub fn list_of(element: TypeCategory) -> Self {
        Self {
            category: TypeCategory::List,
            inner: Some(InnerCategory::Element(element)),
        }
    }

    pub fn map_of(value: TypeCategory) -> Self {
        Self {
            category: TypeCategory::Map,
            inner: Some(InnerCategory::Value(value)),
        }
    }

    pub fn record_of(fields: impl IntoIterator<Item = TypeCategory>) -> Self {
        Self {
            category: TypeCategory::Record,
            inner: Some(InnerCategory::Fields(fields.into_iter().collect())),
        }
    }

    /// A range over an ordered category
    pub fn range_of(element: TypeCategory) -> ResolutionResult<Self> {
        Self::with_inner(TypeCategory::Range, Some(InnerCategory::Element(element)))
    }

    /// Build a resolved type from parts, checking that the inner category
    /// fits the outer one
    pub fn with_inner(
        category: TypeCategory,
        inner: Option<InnerCategory>,
    ) -> ResolutionResult<Self> {
        let resolved = Self { category, inner };
        let Some(inner) = &resolved.inner else {
            return Ok(resolved);
        };
        let fits = match (category, inner) {
            (TypeCategory::Array | TypeCategory::List, InnerCategory::Element(_)) => true,
            (TypeCategory::Range, InnerCategory::Element(element)) => {
                if !element.is_ordered() {
                    return Err(InvalidResolutionState::new(
                        resolved.to_string(),
                        StateViolation::IllegalInnerCategory {
                            container: category,
                            inner: *element,
                        },
                    ));
                }
                true
            }
            (TypeCategory::Map, InnerCategory::Value(_)) => true,
            (TypeCategory::Record, InnerCategory::Fields(_)) => true,
            _ => false,
        };
        if fits {
            Ok(resolved)
        } else {
            Err(InvalidResolutionState::new(
                category.to_string(),
                StateViolation::WrongInnerKind {
                    expected: inner.kind(),
                    category,
                },
            ))
        }
    }

    // === Accessors ===

    pub fn category(&self) -> TypeCategory {
        self.category
    }

    pub fn inner(&self) -> Option<&InnerCategory> {
        self.inner.as_ref()
    }

    /// Element category of an array, list or range
    pub fn element_category(&self) -> ResolutionResult<TypeCategory> {
        match (&self.inner, self.category.has_element()) {
            (Some(InnerCategory::Element(element)), _) => Ok(*element),
            (None, true) => Err(self.unresolved_inner()),
            _ => Err(self.wrong_kind("element")),
        }
    }

    /// Value category of a map
    pub fn map_value_category(&self) -> ResolutionResult<TypeCategory> {
        match (&self.inner, self.category) {
            (Some(InnerCategory::Value(value)), _) => Ok(*value),
            (None, TypeCategory::Map) => Err(self.unresolved_inner()),
            _ => Err(self.wrong_kind("map value")),
        }
    }

    /// Field categories of a record, by position
    pub fn field_categories(&self) -> ResolutionResult<&[TypeCategory]> {
        match (&self.inner, self.category) {
            (Some(InnerCategory::Fields(fields)), _) => Ok(fields),
            (None, TypeCategory::Record) => Err(self.unresolved_inner()),
            _ => Err(self.wrong_kind("field")),
        }
    }

    /// Category of one entry of a collection: the element of an array, list
    /// or range, or the value of a map
    pub fn entry_category(&self) -> ResolutionResult<TypeCategory> {
        match self.category {
            TypeCategory::Map => self.map_value_category(),
            _ => self.element_category(),
        }
    }

    fn unresolved_inner(&self) -> InvalidResolutionState {
        InvalidResolutionState::new(
            self.to_string(),
            StateViolation::InnerCategoryUnresolved {
                category: self.category,
            },
        )
    }

    fn wrong_kind(&self, expected: &'static str) -> InvalidResolutionState {
        InvalidResolutionState::new(
            self.to_string(),
            StateViolation::WrongInnerKind {
                expected,
                category: self.category,
            },
        )
    }
}

impl InnerCategory {
    fn kind(&self) -> &'static str {
        match self {
            Self::Element(_) => "element",
            Self::Value(_) => "map value",
            Self::Fields(_) => "field",
        }
    }
}

impl From<TypeCategory> for ResolvedType {
    fn from(category: TypeCategory) -> Self {
        Self::new(category)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            None => write!(f, "{}", self.category),
            Some(InnerCategory::Element(element)) => write!(f, "{}<{}>", self.category, element),
            Some(InnerCategory::Value(value)) => write!(f, "{}<{}>", self.category, value),
            Some(InnerCategory::Fields(fields)) => {
                let names: Vec<&str> = fields.iter().map(TypeCategory::name).collect();
                write!(f, "{}({})", self.category, names.join(", "))
            }
        }
    }
}

/// Serialized form, validated on the way in
#[derive(Serialize, Deserialize)]
struct ResolvedTypeRepr {
    category: TypeCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inner: Option<InnerCategory>,
}

impl TryFrom<ResolvedTypeRepr> for ResolvedType {
    type Error = InvalidResolutionState;

    fn try_from(repr: ResolvedTypeRepr) -> Result<Self, Self::Error> {
        Self::with_inner(repr.category, repr.inner)
    }
}

impl From<ResolvedType> for ResolvedTypeRepr {
    fn from(resolved: ResolvedType) -> Self {
        Self {
            category: resolved.category,
            inner: resolved.inner,
        }
    }
}
