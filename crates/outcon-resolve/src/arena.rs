//! Post-order expression arena
//!
//! Nodes are stored so that every argument precedes the application using
//! it. Walking the arena front to back is therefore a valid bottom-up
//! resolution order.

use outcon_catalog::{Operation, OperationCatalog};
use outcon_types::ResolvedType;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::{Expression, TreeResolutionError, TreeResult};

/// Identity of a node within one arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node with its operation looked up in the catalog
#[derive(Debug, Clone)]
pub enum Node {
    Leaf {
        text: String,
        resolved: ResolvedType,
    },
    Apply {
        operation: Arc<Operation>,
        args: SmallVec<[NodeId; 4]>,
    },
}

impl Node {
    /// Operation name or leaf text
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { text, .. } => text,
            Self::Apply { operation, .. } => &operation.name,
        }
    }
}

/// Flattened expression tree
#[derive(Debug, Clone)]
pub struct ExpressionArena {
    nodes: Vec<Node>,
    root: NodeId,
}

impl ExpressionArena {
    /// Flatten `expr`, looking every operation up in `catalog` and checking
    /// argument counts
    pub fn build(expr: &Expression, catalog: &OperationCatalog) -> TreeResult<Self> {
        let mut nodes = Vec::with_capacity(expr.node_count());
        let root = push(&mut nodes, expr, catalog)?;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in post-order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }
}

fn push(
    nodes: &mut Vec<Node>,
    expr: &Expression,
    catalog: &OperationCatalog,
) -> TreeResult<NodeId> {
    let node = match expr {
        Expression::Leaf { leaf, resolved } => Node::Leaf {
            text: leaf.clone(),
            resolved: resolved.clone(),
        },
        Expression::Apply { op, args } => {
            let operation = catalog
                .get(op)
                .ok_or_else(|| TreeResolutionError::UnknownOperation { name: op.clone() })?;
            if operation.arity() != args.len() {
                return Err(TreeResolutionError::ArityMismatch {
                    operation: op.clone(),
                    expected: operation.arity(),
                    found: args.len(),
                });
            }
            let args = args
                .iter()
                .map(|arg| push(nodes, arg, catalog))
                .collect::<TreeResult<SmallVec<_>>>()?;
            Node::Apply {
                operation: Arc::clone(operation),
                args,
            }
        }
    };
    nodes.push(node);
    Ok(NodeId(nodes.len() - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcon_types::TypeCategory;

    #[test]
    fn test_children_precede_parents() {
        let catalog = OperationCatalog::builtin().unwrap();
        let expr = Expression::apply(
            "concat",
            [
                Expression::apply("upper", [Expression::leaf("'a'", TypeCategory::Text)]),
                Expression::leaf("'b'", TypeCategory::Text),
            ],
        );
        let arena = ExpressionArena::build(&expr, &catalog).unwrap();

        assert_eq!(arena.len(), 4);
        assert_eq!(arena.root(), NodeId(3));
        for (id, node) in arena.iter() {
            if let Node::Apply { args, .. } = node {
                assert!(args.iter().all(|arg| *arg < id));
            }
        }
        let labels: Vec<&str> = arena.iter().map(|(_, node)| node.label()).collect();
        assert_eq!(labels, vec!["'a'", "upper", "'b'", "concat"]);
    }

    #[test]
    fn test_unknown_operation() {
        let catalog = OperationCatalog::builtin().unwrap();
        let expr = Expression::apply("frobnicate", []);
        let err = ExpressionArena::build(&expr, &catalog).unwrap_err();
        assert_eq!(
            err,
            TreeResolutionError::UnknownOperation {
                name: "frobnicate".into()
            }
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let catalog = OperationCatalog::builtin().unwrap();
        let expr = Expression::apply("upper", []);
        let err = ExpressionArena::build(&expr, &catalog).unwrap_err();
        assert!(matches!(err, TreeResolutionError::ArityMismatch { expected: 1, found: 0, .. }));
    }
}
