//! Bottom-up resolution pass
//!
//! Walks an arena in post-order. A leaf contributes its static type. An
//! application gets evidence built from its children's already-resolved
//! types, restricted to the positions its specification requires, and the
//! type returned by the specification is recorded against that node only.

use log::{debug, trace};
use outcon_catalog::{Operation, OperationCatalog};
use outcon_types::{ArgumentEvidence, InvalidResolutionState, ResolutionResult, ResolvedType};

use crate::{Expression, ExpressionArena, Node, NodeId, TreeResolutionError, TreeResult, TypeTable};

/// Resolves expression trees against a catalog
#[derive(Debug, Clone, Copy)]
pub struct ResolutionPass<'c> {
    catalog: &'c OperationCatalog,
    check_arguments: bool,
}

impl<'c> ResolutionPass<'c> {
    /// Create a pass that also checks arguments against declared parameters
    pub fn new(catalog: &'c OperationCatalog) -> Self {
        Self {
            catalog,
            check_arguments: true,
        }
    }

    /// Enable or disable checking arguments against declared parameters
    pub fn with_argument_checks(mut self, check_arguments: bool) -> Self {
        self.check_arguments = check_arguments;
        self
    }

    /// Resolve every node of `expr`
    pub fn resolve(&self, expr: &Expression) -> TreeResult<ResolvedTree> {
        let arena = ExpressionArena::build(expr, self.catalog)?;
        self.resolve_arena(arena)
    }

    /// Resolve every node of an already-built arena
    pub fn resolve_arena(&self, arena: ExpressionArena) -> TreeResult<ResolvedTree> {
        let mut table = TypeTable::new(arena.len());

        for (id, node) in arena.iter() {
            let resolved = match node {
                Node::Leaf { resolved, .. } => resolved.clone(),
                Node::Apply { operation, args } => {
                    self.resolve_application(id, operation, args, &table)?
                }
            };
            trace!("Resolved node #{} ({}) to {}", id, node.label(), resolved);
            table
                .record(id, resolved)
                .map_err(|source| state_error(node.label(), id, source))?;
        }

        let root = arena.root();
        let types = table
            .into_types()
            .map_err(|source| state_error("<tree>", root, source))?;
        debug!("Resolved tree of {} nodes to {}", arena.len(), types[root.0]);
        Ok(ResolvedTree { arena, types })
    }

    fn resolve_application(
        &self,
        id: NodeId,
        operation: &Operation,
        args: &[NodeId],
        table: &TypeTable,
    ) -> TreeResult<ResolvedType> {
        let wrap = |source| state_error(&operation.name, id, source);
        trace!(
            "Resolving {} declared as {}",
            operation.name,
            operation.return_spec.base_category()
        );

        if self.check_arguments {
            for (index, arg) in args.iter().enumerate() {
                let resolved = table.get(*arg).map_err(wrap)?;
                if !operation.accepts_argument(index, resolved) {
                    return Err(TreeResolutionError::ArgumentRejected {
                        operation: operation.name.clone(),
                        index,
                        param: operation.params[index],
                        found: resolved.to_string(),
                    });
                }
            }
        }

        let evidence = operation
            .return_spec
            .required_argument_indices()
            .into_iter()
            .filter_map(|index| args.get(index).map(|arg| (index, *arg)))
            .map(|(index, arg)| table.get(arg).map(|resolved| (index, resolved.clone())))
            .collect::<ResolutionResult<ArgumentEvidence>>()
            .map_err(wrap)?;

        operation.return_spec.resolve(&evidence).map_err(wrap)
    }
}

fn state_error(
    operation: &str,
    node: NodeId,
    source: InvalidResolutionState,
) -> TreeResolutionError {
    TreeResolutionError::Resolution {
        operation: operation.to_string(),
        node,
        source,
    }
}

/// An expression tree with a resolved type for every node
#[derive(Debug, Clone)]
pub struct ResolvedTree {
    arena: ExpressionArena,
    types: Vec<ResolvedType>,
}

impl ResolvedTree {
    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    /// Resolved type of the whole expression
    pub fn root_type(&self) -> &ResolvedType {
        &self.types[self.arena.root().0]
    }

    pub fn type_of(&self, node: NodeId) -> Option<&ResolvedType> {
        self.types.get(node.0)
    }

    pub fn arena(&self) -> &ExpressionArena {
        &self.arena
    }

    /// Nodes in post-order with their resolved types
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node, &ResolvedType)> {
        self.arena
            .iter()
            .zip(&self.types)
            .map(|((id, node), resolved)| (id, node, resolved))
    }

    /// Render the expression as SQL text
    pub fn to_sql(&self) -> String {
        let mut texts: Vec<String> = Vec::with_capacity(self.arena.len());
        for (_, node) in self.arena.iter() {
            let text = match node {
                Node::Leaf { text, .. } => text.clone(),
                Node::Apply { operation, args } => {
                    let args: Vec<String> = args
                        .iter()
                        .map(|arg| match self.arena.get(*arg) {
                            Some(Node::Apply { operation, .. }) if !operation.renders_as_call() => {
                                format!("({})", texts[arg.0])
                            }
                            _ => texts[arg.0].clone(),
                        })
                        .collect();
                    operation.render(&args)
                }
            };
            texts.push(text);
        }
        texts.swap_remove(self.arena.root().0)
    }
}
