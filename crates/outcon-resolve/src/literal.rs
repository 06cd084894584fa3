//! SQL literal rendering

/// Render an optional text value as a SQL literal
///
/// `None` becomes `NULL`. With `sanitize`, embedded single quotes are doubled
/// so the literal cannot terminate early; without it the text is quoted
/// as is.
pub fn as_sanitized_literal(value: Option<&str>, sanitize: bool) -> String {
    match value {
        None => "NULL".to_string(),
        Some(value) if sanitize => format!("'{}'", value.replace('\'', "''")),
        Some(value) => format!("'{}'", value),
    }
}
