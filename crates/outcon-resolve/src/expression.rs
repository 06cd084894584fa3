//! Candidate expressions

use outcon_types::ResolvedType;
use serde::{Deserialize, Serialize};

/// A candidate test expression, as supplied by the expression builder
///
/// Leaves (literals and columns) carry their statically known type. An
/// application names a catalog operation and its chosen arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Leaf {
        /// SQL text of the literal or column
        leaf: String,
        #[serde(rename = "type")]
        resolved: ResolvedType,
    },
    Apply {
        op: String,
        #[serde(default)]
        args: Vec<Expression>,
    },
}

impl Expression {
    pub fn leaf(text: impl Into<String>, resolved: impl Into<ResolvedType>) -> Self {
        Self::Leaf {
            leaf: text.into(),
            resolved: resolved.into(),
        }
    }

    pub fn apply(op: impl Into<String>, args: impl IntoIterator<Item = Expression>) -> Self {
        Self::Apply {
            op: op.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Apply { args, .. } => {
                1 + args.iter().map(Expression::node_count).sum::<usize>()
            }
        }
    }
}

/// Either one expression or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum Candidates {
    Many(Vec<Expression>),
    One(Expression),
}

/// Parse a JSON document holding one candidate expression or an array of them
pub fn candidates_from_json(json: &str) -> Result<Vec<Expression>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        Candidates::Many(many) => many,
        Candidates::One(one) => vec![one],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcon_types::TypeCategory;

    #[test]
    fn test_node_count() {
        let expr = Expression::apply(
            "map_build",
            [
                Expression::leaf("'k'", TypeCategory::Text),
                Expression::apply("abs", [Expression::leaf("-1", TypeCategory::Integer)]),
            ],
        );
        assert_eq!(expr.node_count(), 4);
    }

    #[test]
    fn test_parse_single_and_many() {
        let one = r#"{"op": "upper", "args": [{"leaf": "'a'", "type": {"category": "text"}}]}"#;
        let parsed = candidates_from_json(one).unwrap();
        assert_eq!(
            parsed,
            vec![Expression::apply("upper", [Expression::leaf("'a'", TypeCategory::Text)])]
        );

        let many = format!("[{one}, {one}]");
        assert_eq!(candidates_from_json(&many).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_leaf_with_inner_type() {
        let json = r#"{"leaf": "m", "type": {"category": "map", "inner": {"value": "text"}}}"#;
        let parsed = candidates_from_json(json).unwrap();
        let expected = Expression::leaf("m", ResolvedType::map_of(TypeCategory::Text));
        assert_eq!(parsed, vec![expected]);
    }
}
