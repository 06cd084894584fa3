//! Error codes following a structured numbering system
//!
//! Error code ranges:
//! - OC0001-OC0099: Resolution state violations (contract failures)
//! - OC0100-OC0199: Catalog errors (fatal at load time)
//! - OC0200-OC0299: Expression tree errors (abort one candidate)
//! - OC0400-OC0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OC{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Resolution state violations (0001-0099)
    map.insert(1, ErrorInfo::new("Empty argument evidence")
        .with_help("Build evidence for every argument index the return type requires"));
    map.insert(2, ErrorInfo::new("Missing argument evidence")
        .with_help("Resolve every child node before its parent"));
    map.insert(3, ErrorInfo::new("Argument is not a container"));
    map.insert(4, ErrorInfo::new("Inner category unresolved"));
    map.insert(5, ErrorInfo::new("Wrong inner category kind"));
    map.insert(6, ErrorInfo::new("Node not resolved"));
    map.insert(7, ErrorInfo::new("Node already resolved"));
    map.insert(8, ErrorInfo::new("Illegal inner category"));

    // Catalog errors (0100-0199)
    map.insert(100, ErrorInfo::new("Duplicate operation"));
    map.insert(101, ErrorInfo::new("Empty operation name"));
    map.insert(102, ErrorInfo::new("Required argument index out of range")
        .with_help("A required index must reference a declared parameter"));
    map.insert(103, ErrorInfo::new("Element source parameter is not a container"));
    map.insert(104, ErrorInfo::new("Invalid catalog format"));
    map.insert(105, ErrorInfo::new("Pattern does not match operation arity")
        .with_help("Use one `$` marker per declared parameter"));

    // Expression tree errors (0200-0299)
    map.insert(200, ErrorInfo::new("Unknown operation"));
    map.insert(201, ErrorInfo::new("Invalid argument count"));
    map.insert(202, ErrorInfo::new("Argument rejected by parameter"));

    // System errors (0400-0499)
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Configuration error"));
    map.insert(406, ErrorInfo::new("Invalid format"));

    map
});

// Resolution state violations
pub const OC0001: ErrorCode = ErrorCode::new(1);
pub const OC0002: ErrorCode = ErrorCode::new(2);
pub const OC0003: ErrorCode = ErrorCode::new(3);
pub const OC0004: ErrorCode = ErrorCode::new(4);
pub const OC0005: ErrorCode = ErrorCode::new(5);
pub const OC0006: ErrorCode = ErrorCode::new(6);
pub const OC0007: ErrorCode = ErrorCode::new(7);
pub const OC0008: ErrorCode = ErrorCode::new(8);

// Catalog errors
pub const OC0100: ErrorCode = ErrorCode::new(100);
pub const OC0101: ErrorCode = ErrorCode::new(101);
pub const OC0102: ErrorCode = ErrorCode::new(102);
pub const OC0103: ErrorCode = ErrorCode::new(103);
pub const OC0104: ErrorCode = ErrorCode::new(104);
pub const OC0105: ErrorCode = ErrorCode::new(105);

// Expression tree errors
pub const OC0200: ErrorCode = ErrorCode::new(200);
pub const OC0201: ErrorCode = ErrorCode::new(201);
pub const OC0202: ErrorCode = ErrorCode::new(202);

// System errors
pub const OC0401: ErrorCode = ErrorCode::new(401);
pub const OC0402: ErrorCode = ErrorCode::new(402);
pub const OC0406: ErrorCode = ErrorCode::new(406);
