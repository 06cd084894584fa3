//! Expression-tree type resolution
//!
//! This crate drives return-type resolution for generated test expressions:
//! - Flattening an expression into a post-order arena
//! - Resolving every node exactly once, children before parents
//! - Resolving many candidates concurrently against one shared catalog
//! - Choosing comparison strategies and representative values for a
//!   resolved type

pub mod arena;
pub mod batch;
pub mod compare;
pub mod error;
pub mod expression;
pub mod literal;
pub mod pass;
pub mod table;
pub mod values;

pub use arena::*;
pub use batch::*;
pub use compare::*;
pub use error::*;
pub use expression::*;
pub use literal::*;
pub use pass::*;
pub use table::*;
pub use values::*;
