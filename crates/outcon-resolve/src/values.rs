//! Representative values for a resolved type
//!
//! Value generators use these to feed an operation's result into other
//! operations. The literals only need to be of the right type; they are not
//! meant to cover edge cases exhaustively.

use outcon_types::{
    InvalidResolutionState, ResolutionResult, ResolvedType, StateViolation, TypeCategory,
};

use crate::as_sanitized_literal;

/// SQL literals of `resolved`, at least one per type
///
/// Fails for containers whose inner category is unknown, and for containers
/// nested directly inside another container, since only the outer category
/// of an inner container is known.
pub fn representative_literals(resolved: &ResolvedType) -> ResolutionResult<Vec<String>> {
    match resolved.category() {
        TypeCategory::Array => {
            let elements = scalar_literals(resolved.element_category()?)?;
            Ok(vec![
                format!("ARRAY[{}]", elements.join(", ")),
                format!("ARRAY[{}]", elements[0]),
            ])
        }
        TypeCategory::List => {
            let elements = scalar_literals(resolved.element_category()?)?;
            Ok(vec![
                format!("LIST[{}]", elements.join(", ")),
                format!("LIST[{}]", elements[0]),
            ])
        }
        TypeCategory::Map => {
            let values = scalar_literals(resolved.map_value_category()?)?;
            let entries: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(i, value)| format!("'k{}' => {}", i, value))
                .collect();
            Ok(vec![
                format!("MAP[{}]", entries.join(", ")),
                format!("MAP[{}]", entries[0]),
            ])
        }
        TypeCategory::Range => range_literals(resolved.element_category()?),
        TypeCategory::Record => {
            let fields = resolved
                .field_categories()?
                .iter()
                .map(|field| scalar_literals(*field).map(|samples| samples[0].clone()))
                .collect::<ResolutionResult<Vec<String>>>()?;
            Ok(vec![format!("ROW({})", fields.join(", "))])
        }
        category => scalar_literals(category),
    }
}

/// Literals of a non-container category; never empty
fn scalar_literals(category: TypeCategory) -> ResolutionResult<Vec<String>> {
    let literals: Vec<String> = match category {
        TypeCategory::Boolean => vec!["TRUE".into(), "FALSE".into()],
        TypeCategory::Integer => vec!["0".into(), "1".into(), "-1".into(), "2147483647".into()],
        TypeCategory::Numeric => vec!["0.0".into(), "1.5".into(), "-12.345".into(), "1e10".into()],
        TypeCategory::Text => [Some("hello"), Some(""), Some("it's")]
            .into_iter()
            .map(|text| as_sanitized_literal(text, true))
            .collect(),
        TypeCategory::Bytea => vec!["'\\x00'::BYTEA".into(), "'\\xdeadbeef'::BYTEA".into()],
        TypeCategory::Uuid => vec!["'a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11'::UUID".into()],
        TypeCategory::DateTime => vec![
            "TIMESTAMP '2024-01-01 00:00:00'".into(),
            "TIMESTAMP '1999-12-31 23:59:59.999999'".into(),
        ],
        TypeCategory::Interval => vec![
            "INTERVAL '1 day'".into(),
            "INTERVAL '-2 hours 30 minutes'".into(),
        ],
        TypeCategory::Jsonb => vec![
            "'{\"a\": 1}'::JSONB".into(),
            "'[1, \"two\", null]'::JSONB".into(),
        ],
        container => {
            return Err(InvalidResolutionState::new(
                container.to_string(),
                StateViolation::InnerCategoryUnresolved { category: container },
            ));
        }
    };
    Ok(literals)
}

fn range_literals(element: TypeCategory) -> ResolutionResult<Vec<String>> {
    let range = ResolvedType::range_of(element)?;
    let literals = match range.element_category()? {
        TypeCategory::Integer => {
            vec!["INT4RANGE(1, 10)".to_string(), "INT4RANGE(5, 5)".to_string()]
        }
        TypeCategory::Numeric => vec!["NUMRANGE(0.5, 2.5)".to_string()],
        _ => vec!["TSRANGE('2024-01-01', '2024-02-01')".to_string()],
    };
    Ok(literals)
}
