//! Return-type resolution for output-consistency testing
//!
//! This crate defines the type vocabulary used to predict what category of
//! value an operation produces before anything is executed:
//! - `TypeCategory`, the closed set of concrete result shapes
//! - `ArgumentEvidence`, the per-call record of resolved argument types
//! - `ReturnTypeSpec`, the static blueprint attached to each operation
//! - `ResolvedType`, the per-call result of resolving a blueprint
//!
//! Resolution is a pure function of (specification, evidence). Nothing is
//! written back into a specification, so one catalog can be shared by any
//! number of concurrent resolutions.

pub mod category;
pub mod error;
pub mod evidence;
pub mod resolved;
pub mod spec;

pub use category::*;
pub use error::*;
pub use evidence::*;
pub use resolved::*;
pub use spec::*;
