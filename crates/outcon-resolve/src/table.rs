//! Per-tree table of resolved node types
//!
//! The only place a resolved type is remembered. It is keyed by node
//! identity within one tree and dropped with the tree; nothing is cached on
//! the shared specifications.

use outcon_types::{
    InvalidResolutionState, ResolutionResult, ResolvedType, StateViolation, TypeCategory,
};

use crate::NodeId;

const SUBJECT: &str = "node type table";

#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    slots: Vec<Option<ResolvedType>>,
}

impl TypeTable {
    /// Create a table for a tree of `len` nodes, all unresolved
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Record the resolved type of a node; each node is resolved once
    pub fn record(&mut self, node: NodeId, resolved: ResolvedType) -> ResolutionResult<()> {
        match self.slots.get_mut(node.0) {
            Some(slot @ None) => {
                *slot = Some(resolved);
                Ok(())
            }
            Some(Some(_)) => Err(violation(StateViolation::NodeAlreadyResolved { node: node.0 })),
            None => Err(violation(StateViolation::NodeNotResolved { node: node.0 })),
        }
    }

    /// Resolved type of a node
    pub fn get(&self, node: NodeId) -> ResolutionResult<&ResolvedType> {
        self.slots
            .get(node.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| violation(StateViolation::NodeNotResolved { node: node.0 }))
    }

    pub fn is_resolved(&self, node: NodeId) -> bool {
        self.get(node).is_ok()
    }

    pub fn element_category(&self, node: NodeId) -> ResolutionResult<TypeCategory> {
        self.get(node)?.element_category()
    }

    pub fn map_value_category(&self, node: NodeId) -> ResolutionResult<TypeCategory> {
        self.get(node)?.map_value_category()
    }

    pub fn field_categories(&self, node: NodeId) -> ResolutionResult<&[TypeCategory]> {
        self.get(node)?.field_categories()
    }

    /// All resolved types in node order; fails if any node is unresolved
    pub fn into_types(self) -> ResolutionResult<Vec<ResolvedType>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(node, slot)| {
                slot.ok_or_else(|| violation(StateViolation::NodeNotResolved { node }))
            })
            .collect()
    }
}

fn violation(violation: StateViolation) -> InvalidResolutionState {
    InvalidResolutionState::new(SUBJECT, violation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_before_resolution() {
        let table = TypeTable::new(2);
        let err = table.map_value_category(NodeId(1)).unwrap_err();
        assert_eq!(err.violation, StateViolation::NodeNotResolved { node: 1 });
    }

    #[test]
    fn test_accessor_after_resolution() {
        let mut table = TypeTable::new(1);
        table.record(NodeId(0), ResolvedType::map_of(TypeCategory::Text)).unwrap();
        assert_eq!(table.map_value_category(NodeId(0)), Ok(TypeCategory::Text));
    }

    #[test]
    fn test_each_node_recorded_once() {
        let mut table = TypeTable::new(1);
        table.record(NodeId(0), TypeCategory::Text.into()).unwrap();
        let err = table.record(NodeId(0), TypeCategory::Integer.into()).unwrap_err();
        assert_eq!(err.violation, StateViolation::NodeAlreadyResolved { node: 0 });
        assert_eq!(table.get(NodeId(0)).unwrap().category(), TypeCategory::Text);
    }

    #[test]
    fn test_into_types_requires_every_node() {
        let mut table = TypeTable::new(2);
        table.record(NodeId(0), TypeCategory::Uuid.into()).unwrap();
        let err = table.into_types().unwrap_err();
        assert_eq!(err.violation, StateViolation::NodeNotResolved { node: 1 });
    }

    #[test]
    fn test_out_of_range_node() {
        let mut table = TypeTable::new(0);
        assert!(table.record(NodeId(3), TypeCategory::Uuid.into()).is_err());
        assert!(!table.is_resolved(NodeId(3)));
    }
}
