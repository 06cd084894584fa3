//! Resolution contract violations

use outcon_diagnostics::{
    Diagnostic, ErrorCode, OC0001, OC0002, OC0003, OC0004, OC0005, OC0006, OC0007, OC0008,
};
use thiserror::Error;

use crate::TypeCategory;

/// What exactly was wrong with the resolution state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateViolation {
    #[error("argument evidence is empty but indices {required:?} are required")]
    EmptyEvidence { required: Vec<usize> },

    #[error("no resolved category for argument ${index}")]
    MissingArgument { index: usize },

    #[error("argument ${index} is {category}, which has no element category")]
    NotAContainer { index: usize, category: TypeCategory },

    #[error("inner category of {category} is not resolved")]
    InnerCategoryUnresolved { category: TypeCategory },

    #[error("{category} has no {expected} category")]
    WrongInnerKind {
        expected: &'static str,
        category: TypeCategory,
    },

    #[error("node #{node} has not been resolved")]
    NodeNotResolved { node: usize },

    #[error("node #{node} was already resolved")]
    NodeAlreadyResolved { node: usize },

    #[error("{inner} cannot be the inner category of {container}")]
    IllegalInnerCategory {
        container: TypeCategory,
        inner: TypeCategory,
    },
}

/// A contract violation during resolution
///
/// Always a bug in a catalog declaration or in the orchestration pass, never
/// an expected runtime condition, so callers are not expected to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid resolution state in {subject}: {violation}")]
pub struct InvalidResolutionState {
    /// Specification, operation or resolved type the violation was detected on
    pub subject: String,
    pub violation: StateViolation,
}

/// Resolution result
pub type ResolutionResult<T> = Result<T, InvalidResolutionState>;

impl InvalidResolutionState {
    pub fn new(subject: impl Into<String>, violation: StateViolation) -> Self {
        Self {
            subject: subject.into(),
            violation,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self.violation {
            StateViolation::EmptyEvidence { .. } => OC0001,
            StateViolation::MissingArgument { .. } => OC0002,
            StateViolation::NotAContainer { .. } => OC0003,
            StateViolation::InnerCategoryUnresolved { .. } => OC0004,
            StateViolation::WrongInnerKind { .. } => OC0005,
            StateViolation::NodeNotResolved { .. } => OC0006,
            StateViolation::NodeAlreadyResolved { .. } => OC0007,
            StateViolation::IllegalInnerCategory { .. } => OC0008,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code(), self.violation.to_string())
            .with_subject(self.subject.clone())
    }
}
