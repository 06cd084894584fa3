//! Operation catalog
//!
//! The catalog maps operation names to their formal parameters and return-type
//! specifications. It is validated once when built and is read-only afterwards,
//! so it can be shared between resolution workers behind an `Arc`.

mod builtin;
mod catalog;
mod error;
mod operation;

pub use catalog::*;
pub use error::*;
pub use operation::*;
