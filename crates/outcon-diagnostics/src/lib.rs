//! Diagnostics for output-consistency type resolution
//!
//! This crate provides the shared error-reporting vocabulary used by the
//! resolution core, the operation catalog and the CLI: structured error codes,
//! severities and diagnostic records.

mod diagnostic;
mod error_code;
#[cfg(feature = "colored")]
mod render;

pub use diagnostic::*;
pub use error_code::*;
#[cfg(feature = "colored")]
pub use render::*;
