//! Expression tree errors
//!
//! A `TreeResolutionError` aborts the candidate it was raised for and nothing
//! else: the shared catalog is never touched by a failed resolution.

use outcon_catalog::ParamCategory;
use outcon_diagnostics::{Diagnostic, ErrorCode, OC0200, OC0201, OC0202, RelatedInfo};
use outcon_types::InvalidResolutionState;
use thiserror::Error;

use crate::NodeId;

/// Errors raised while resolving one expression tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeResolutionError {
    /// The expression names an operation the catalog does not have
    #[error("Unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// Wrong number of arguments for an operation
    #[error("Operation '{operation}' takes {expected} argument(s), but {found} were given")]
    ArityMismatch {
        operation: String,
        expected: usize,
        found: usize,
    },

    /// An argument's resolved type does not fit the declared parameter
    #[error(
        "Operation '{operation}' does not accept {found} as argument ${index} (expected {param})"
    )]
    ArgumentRejected {
        operation: String,
        index: usize,
        param: ParamCategory,
        found: String,
    },

    /// The operation's specification could not be resolved at this node
    #[error("Cannot resolve node #{node} ({operation}): {source}")]
    Resolution {
        operation: String,
        node: NodeId,
        source: InvalidResolutionState,
    },
}

/// Tree resolution result
pub type TreeResult<T> = Result<T, TreeResolutionError>;

impl TreeResolutionError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownOperation { .. } => OC0200,
            Self::ArityMismatch { .. } => OC0201,
            Self::ArgumentRejected { .. } => OC0202,
            Self::Resolution { source, .. } => source.code(),
        }
    }

    /// Name of the operation involved, if any
    pub fn operation(&self) -> &str {
        match self {
            Self::UnknownOperation { name } => name,
            Self::ArityMismatch { operation, .. }
            | Self::ArgumentRejected { operation, .. }
            | Self::Resolution { operation, .. } => operation,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Resolution {
                operation,
                node,
                source,
            } => source
                .to_diagnostic()
                .with_subject(operation.clone())
                .with_related(RelatedInfo::new(format!(
                    "while resolving node #{} against {}",
                    node, source.subject
                ))),
            _ => Diagnostic::error(self.code(), self.to_string())
                .with_subject(self.operation().to_string()),
        }
    }
}
