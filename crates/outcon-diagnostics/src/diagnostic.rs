//! Diagnostic records

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Error - the candidate or catalog cannot be used
    Error,
    /// Warning - potential issue but can continue
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// What the diagnostic is about (operation name, candidate index, file)
    pub subject: Option<String>,
    /// Additional context or help
    pub help: Option<String>,
    /// Related information
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            subject: None,
            help: code.info().help.map(str::to_string),
            related: Vec::new(),
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add related information
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(subject) = &self.subject {
            write!(f, " in {}", subject)?;
        }
        Ok(())
    }
}

/// Related diagnostic information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedInfo {
    /// Message explaining the relationship
    pub message: String,
}

impl RelatedInfo {
    /// Create new related info
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OC0002, OC0200};

    #[test]
    fn test_diagnostic_display() {
        let diag =
            Diagnostic::error(OC0200, "Unknown operation 'foo'").with_subject("candidate #3");

        let rendered = diag.to_string();
        assert!(rendered.starts_with("error: OC0200"));
        assert!(rendered.ends_with("in candidate #3"));
    }

    #[test]
    fn test_help_defaults_from_error_info() {
        let diag = Diagnostic::error(OC0002, "missing index 2");
        assert_eq!(diag.help.as_deref(), OC0002.info().help);
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_warning_keeps_code() {
        let diag =
            Diagnostic::warning(OC0200, "skipped").with_related(RelatedInfo::new("first use"));
        assert_eq!(diag.severity, Severity::Warning);
        assert!(!diag.is_error());
        assert_eq!(diag.related.len(), 1);
    }
}
