//! Terminal rendering of diagnostics

use crate::{Diagnostic, Severity};
use colored::Colorize;

/// Render a diagnostic for a terminal, one header line followed by indented
/// help and related notes.
pub fn render_colored(diagnostic: &Diagnostic) -> String {
    let severity = match diagnostic.severity {
        Severity::Error => diagnostic.severity.to_string().red().bold(),
        Severity::Warning => diagnostic.severity.to_string().yellow().bold(),
    };

    let mut out = format!(
        "{}[{}]: {}",
        severity,
        diagnostic.code.to_string().bold(),
        diagnostic.message
    );
    if let Some(subject) = &diagnostic.subject {
        out.push_str(&format!("\n  {} {}", "-->".blue(), subject));
    }
    if let Some(help) = &diagnostic.help {
        out.push_str(&format!("\n  {} {}", "help:".cyan(), help));
    }
    for related in &diagnostic.related {
        out.push_str(&format!("\n  {} {}", "note:".dimmed(), related.message));
    }
    out
}
