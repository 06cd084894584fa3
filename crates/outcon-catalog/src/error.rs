//! Catalog errors
//!
//! A catalog error means the catalog cannot be used at all. They are raised
//! while the catalog is built, before any expression is resolved.

use outcon_diagnostics::{
    Diagnostic, ErrorCode, OC0100, OC0101, OC0102, OC0103, OC0104, OC0105, OC0401,
};
use std::path::PathBuf;
use thiserror::Error;

use crate::ParamCategory;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two operations share a name
    #[error("Duplicate operation '{name}'")]
    DuplicateOperation { name: String },

    /// Operation without a name
    #[error("Operation with an empty name")]
    EmptyName,

    /// A required argument index can never be satisfied
    #[error(
        "Operation '{operation}' returns {spec}, which requires argument ${index}, \
         but it takes {arity} argument(s)"
    )]
    RequiredIndexOutOfRange {
        operation: String,
        spec: String,
        index: usize,
        arity: usize,
    },

    /// The element source of an element-of specification can never be a container
    #[error(
        "Operation '{operation}' returns the element of argument ${index}, \
         but that parameter is {param}"
    )]
    NotAContainerParameter {
        operation: String,
        index: usize,
        param: ParamCategory,
    },

    /// The rendering pattern does not place every argument exactly once
    #[error(
        "Operation '{operation}' has a pattern with {placeholders} argument marker(s), \
         but it takes {arity} argument(s)"
    )]
    PatternArityMismatch {
        operation: String,
        placeholders: usize,
        arity: usize,
    },

    /// Malformed catalog document
    #[error("Invalid catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file could not be read
    #[error("Cannot read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Catalog result
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateOperation { .. } => OC0100,
            Self::EmptyName => OC0101,
            Self::RequiredIndexOutOfRange { .. } => OC0102,
            Self::NotAContainerParameter { .. } => OC0103,
            Self::PatternArityMismatch { .. } => OC0105,
            Self::Json(_) => OC0104,
            Self::Io { .. } => OC0401,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            Self::DuplicateOperation { name } => diag.with_subject(name.clone()),
            Self::RequiredIndexOutOfRange { operation, .. }
            | Self::NotAContainerParameter { operation, .. }
            | Self::PatternArityMismatch { operation, .. } => diag.with_subject(operation.clone()),
            Self::Io { path, .. } => diag.with_subject(path.display().to_string()),
            Self::EmptyName | Self::Json(_) => diag,
        }
    }
}
