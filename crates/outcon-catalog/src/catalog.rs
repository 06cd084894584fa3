//! Validated operation catalog

use indexmap::IndexMap;
use log::debug;
use outcon_types::ReturnTypeSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::builtin::builtin_operations;
use crate::{CatalogError, CatalogResult, Operation};

/// Serialized catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub operations: Vec<Operation>,
}

/// Read-only set of operations, in declaration order
///
/// Every operation has passed validation: each index its return-type
/// specification requires references a declared parameter.
#[derive(Debug, Clone, Default)]
pub struct OperationCatalog {
    operations: IndexMap<String, Arc<Operation>>,
}

impl OperationCatalog {
    /// Build a catalog, validating every operation
    pub fn new(operations: impl IntoIterator<Item = Operation>) -> CatalogResult<Self> {
        let mut catalog = Self::default();
        for operation in operations {
            validate(&operation)?;
            if catalog.operations.contains_key(&operation.name) {
                return Err(CatalogError::DuplicateOperation {
                    name: operation.name,
                });
            }
            catalog
                .operations
                .insert(operation.name.clone(), Arc::new(operation));
        }
        debug!("Built operation catalog with {} operations", catalog.len());
        Ok(catalog)
    }

    /// The operations shipped with this crate
    pub fn builtin() -> CatalogResult<Self> {
        Self::new(builtin_operations())
    }

    /// Parse a JSON catalog document
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.operations)
    }

    /// Load a JSON catalog document from disk
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading operation catalog from {}", path.display());
        Self::from_json(&json)
    }

    /// Serialize back into a catalog document
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            operations: self.iter().map(|op| op.as_ref().clone()).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Operation>> {
        self.operations.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Operation>> {
        self.operations.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// One signature per line, in declaration order
    pub fn describe(&self) -> String {
        self.iter()
            .map(|op| op.signature())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reject declarations that no call site could ever satisfy
fn validate(operation: &Operation) -> CatalogResult<()> {
    if operation.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }

    let arity = operation.arity();
    if let Some(index) = operation
        .return_spec
        .required_argument_indices()
        .into_iter()
        .find(|index| *index >= arity)
    {
        return Err(CatalogError::RequiredIndexOutOfRange {
            operation: operation.name.clone(),
            spec: operation.return_spec.to_string(),
            index,
            arity,
        });
    }

    if let ReturnTypeSpec::ElementOf { index } = operation.return_spec {
        let param = operation.params[index];
        if !param.admits_entries() {
            return Err(CatalogError::NotAContainerParameter {
                operation: operation.name.clone(),
                index,
                param,
            });
        }
    }

    if let Some(placeholders) = operation
        .placeholder_count()
        .filter(|placeholders| *placeholders != arity)
    {
        return Err(CatalogError::PatternArityMismatch {
            operation: operation.name.clone(),
            placeholders,
            arity,
        });
    }

    Ok(())
}
