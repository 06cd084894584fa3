//! Return-type specifications
//!
//! A `ReturnTypeSpec` is a static blueprint built once per operation when the
//! catalog is loaded. Resolving it against the evidence of one call site
//! yields a fresh `ResolvedType`; the blueprint itself is never modified, so a
//! shared specification gives each call a result that depends on that call's
//! evidence only.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::{
    ArgumentEvidence, CategorySlot, DeclaredCategory, InvalidResolutionState, ResolutionResult,
    ResolvedType, StateViolation, TypeCategory,
};

/// How an operation's result type is computed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReturnTypeSpec {
    /// A concrete category, independent of the arguments
    Fixed { category: TypeCategory },
    /// An array whose element category is fixed or taken from an argument
    ArrayOf { element: CategorySlot },
    /// A list whose element category is fixed or taken from an argument
    ListOf { element: CategorySlot },
    /// A map whose value category is fixed or taken from an argument
    Map { value: CategorySlot },
    /// A record whose fields are each fixed or taken from an argument
    Record { fields: Vec<CategorySlot> },
    /// The whole resolved type of the argument at `index`
    DynamicByArgument { index: usize },
    /// The entry category of the container argument at `index`
    ElementOf { index: usize },
}

impl ReturnTypeSpec {
    // === Constructors ===

    pub fn fixed(category: TypeCategory) -> Self {
        Self::Fixed { category }
    }

    pub fn array_of(element: impl Into<CategorySlot>) -> Self {
        Self::ArrayOf {
            element: element.into(),
        }
    }

    pub fn list_of(element: impl Into<CategorySlot>) -> Self {
        Self::ListOf {
            element: element.into(),
        }
    }

    pub fn map(value: impl Into<CategorySlot>) -> Self {
        Self::Map {
            value: value.into(),
        }
    }

    pub fn record(fields: impl IntoIterator<Item = CategorySlot>) -> Self {
        Self::Record {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn dynamic(index: usize) -> Self {
        Self::DynamicByArgument { index }
    }

    pub fn element_of(index: usize) -> Self {
        Self::ElementOf { index }
    }

    // === Declared shape ===

    /// The category reported before any evidence is seen
    pub fn base_category(&self) -> DeclaredCategory {
        match self {
            Self::Fixed { category } => DeclaredCategory::Known(*category),
            Self::ArrayOf { .. } => DeclaredCategory::Known(TypeCategory::Array),
            Self::ListOf { .. } => DeclaredCategory::Known(TypeCategory::List),
            Self::Map { .. } => DeclaredCategory::Known(TypeCategory::Map),
            Self::Record { .. } => DeclaredCategory::Known(TypeCategory::Record),
            Self::DynamicByArgument { .. } | Self::ElementOf { .. } => DeclaredCategory::Dynamic,
        }
    }

    /// Argument positions whose resolved types this specification needs,
    /// ascending and without duplicates
    pub fn required_argument_indices(&self) -> SmallVec<[usize; 4]> {
        let mut indices: SmallVec<[usize; 4]> = match self {
            Self::Fixed { .. } => SmallVec::new(),
            Self::ArrayOf { element } | Self::ListOf { element } => {
                element.required_index().into_iter().collect()
            }
            Self::Map { value } => value.required_index().into_iter().collect(),
            Self::Record { fields } => {
                fields.iter().filter_map(CategorySlot::required_index).collect()
            }
            Self::DynamicByArgument { index } | Self::ElementOf { index } => {
                smallvec::smallvec![*index]
            }
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    // === Resolution ===

    /// Resolve this specification for one call site
    ///
    /// If any argument index is required, `evidence` must hold a resolved
    /// type at each of them. Entries at other positions are ignored.
    pub fn resolve(&self, evidence: &ArgumentEvidence) -> ResolutionResult<ResolvedType> {
        self.check_evidence(evidence)?;

        match self {
            Self::Fixed { category } => Ok(ResolvedType::new(*category)),
            Self::ArrayOf { element } => Ok(ResolvedType::array_of(self.fill(element, evidence)?)),
            Self::ListOf { element } => Ok(ResolvedType::list_of(self.fill(element, evidence)?)),
            Self::Map { value } => Ok(ResolvedType::map_of(self.fill(value, evidence)?)),
            Self::Record { fields } => {
                let fields = fields
                    .iter()
                    .map(|slot| self.fill(slot, evidence))
                    .collect::<ResolutionResult<Vec<_>>>()?;
                Ok(ResolvedType::record_of(fields))
            }
            Self::DynamicByArgument { index } => Ok(self.argument(evidence, *index)?.clone()),
            Self::ElementOf { index } => {
                let argument = self.argument(evidence, *index)?;
                if !argument.category().has_element() && argument.category() != TypeCategory::Map {
                    return Err(self.violation(StateViolation::NotAContainer {
                        index: *index,
                        category: argument.category(),
                    }));
                }
                argument
                    .entry_category()
                    .map(ResolvedType::new)
                    .map_err(|err| self.violation(err.violation))
            }
        }
    }

    fn check_evidence(&self, evidence: &ArgumentEvidence) -> ResolutionResult<()> {
        let required = self.required_argument_indices();
        if required.is_empty() {
            return Ok(());
        }
        if evidence.is_empty() {
            return Err(self.violation(StateViolation::EmptyEvidence {
                required: required.to_vec(),
            }));
        }
        match required.iter().find(|index| evidence.resolved_at(**index).is_none()) {
            Some(&index) => Err(self.violation(StateViolation::MissingArgument { index })),
            None => Ok(()),
        }
    }

    fn fill(
        &self,
        slot: &CategorySlot,
        evidence: &ArgumentEvidence,
    ) -> ResolutionResult<TypeCategory> {
        match slot {
            CategorySlot::Fixed(category) => Ok(*category),
            CategorySlot::FromArgument(index) => Ok(self.argument(evidence, *index)?.category()),
        }
    }

    fn argument<'e>(
        &self,
        evidence: &'e ArgumentEvidence,
        index: usize,
    ) -> ResolutionResult<&'e ResolvedType> {
        evidence
            .resolved_at(index)
            .ok_or_else(|| self.violation(StateViolation::MissingArgument { index }))
    }

    fn violation(&self, violation: StateViolation) -> InvalidResolutionState {
        InvalidResolutionState::new(self.to_string(), violation)
    }
}

impl fmt::Display for ReturnTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { category } => write!(f, "{}", category),
            Self::ArrayOf { element } => write!(f, "ARRAY<{}>", element),
            Self::ListOf { element } => write!(f, "LIST<{}>", element),
            Self::Map { value } => write!(f, "MAP<{}>", value),
            Self::Record { fields } => {
                let fields: Vec<String> = fields.iter().map(ToString::to_string).collect();
                write!(f, "RECORD({})", fields.join(", "))
            }
            Self::DynamicByArgument { index } => write!(f, "TYPE_OF(${})", index),
            Self::ElementOf { index } => write!(f, "ELEMENT_OF(${})", index),
        }
    }
}
