//! Bottom-up resolution of whole expression trees against the builtin catalog

use outcon_catalog::OperationCatalog;
use outcon_diagnostics::{OC0002, OC0004, OC0200, OC0201, OC0202};
use outcon_resolve::{
    ComparisonStrategy, Expression, NodeId, ResolutionPass, TreeResolutionError,
    representative_literals,
};
use outcon_types::{ResolvedType, StateViolation, TypeCategory};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn catalog() -> OperationCatalog {
    OperationCatalog::builtin().unwrap()
}

fn text(value: &str) -> Expression {
    Expression::leaf(format!("'{}'", value), TypeCategory::Text)
}

fn int(value: i64) -> Expression {
    Expression::leaf(value.to_string(), TypeCategory::Integer)
}

#[rstest]
fn test_map_of_nested_dynamic(catalog: OperationCatalog) {
    // map_build('k', abs(-3))
    let expr = Expression::apply("map_build", [text("k"), Expression::apply("abs", [int(-3)])]);
    let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();

    assert_eq!(tree.root_type(), &ResolvedType::map_of(TypeCategory::Integer));
    assert_eq!(tree.root_type().map_value_category(), Ok(TypeCategory::Integer));
    assert_eq!(tree.type_of(NodeId(2)), Some(&ResolvedType::new(TypeCategory::Integer)));
}

#[rstest]
fn test_every_node_resolved_bottom_up(catalog: OperationCatalog) {
    // map_get(map_build('k', 'v'), 'k')
    let expr = Expression::apply(
        "map_get",
        [Expression::apply("map_build", [text("k"), text("v")]), text("k")],
    );
    let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();

    let types: Vec<String> = tree.iter().map(|(_, _, resolved)| resolved.to_string()).collect();
    assert_eq!(types, vec!["TEXT", "TEXT", "MAP<TEXT>", "TEXT", "TEXT"]);
    assert_eq!(tree.root(), NodeId(4));
}

#[rstest]
fn test_dynamic_keeps_inner_category(catalog: OperationCatalog) {
    let array = Expression::leaf("ARRAY[1, 2]", ResolvedType::array_of(TypeCategory::Integer));
    let expr = Expression::apply("coalesce", [array.clone(), array]);
    let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();

    assert_eq!(tree.root_type().element_category(), Ok(TypeCategory::Integer));
    assert_eq!(
        ComparisonStrategy::for_type(tree.root_type()),
        ComparisonStrategy::Elementwise(Box::new(ComparisonStrategy::Exact))
    );
}

#[rstest]
fn test_same_shape_different_evidence(catalog: OperationCatalog) {
    let pass = ResolutionPass::new(&catalog);
    let first = pass
        .resolve(&Expression::apply("map_build", [text("a"), text("b")]))
        .unwrap();
    let second = pass
        .resolve(&Expression::apply("map_build", [text("a"), int(1)]))
        .unwrap();

    assert_eq!(first.root_type().to_string(), "MAP<TEXT>");
    assert_eq!(second.root_type().to_string(), "MAP<INTEGER>");
}

#[rstest]
fn test_record_of_two_arguments(catalog: OperationCatalog) {
    let flag = Expression::leaf("TRUE", TypeCategory::Boolean);
    let expr = Expression::apply("row", [int(1), Expression::apply("not", [flag])]);
    let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();

    assert_eq!(
        tree.root_type().field_categories().unwrap(),
        &[TypeCategory::Integer, TypeCategory::Boolean]
    );
    assert_eq!(representative_literals(tree.root_type()).unwrap(), vec!["ROW(0, TRUE)"]);
}

#[rstest]
fn test_element_of_opaque_map_leaf(catalog: OperationCatalog) {
    let opaque = Expression::leaf("some_map", TypeCategory::Map);
    let expr = Expression::apply("map_get", [opaque, text("k")]);
    let err = ResolutionPass::new(&catalog).resolve(&expr).unwrap_err();

    assert_eq!(err.code(), OC0004);
    let TreeResolutionError::Resolution { operation, node, source } = err else {
        panic!("expected a resolution error");
    };
    assert_eq!(operation, "map_get");
    assert_eq!(node, NodeId(2));
    assert_eq!(source.subject, "ELEMENT_OF($0)");
    assert_eq!(
        source.violation,
        StateViolation::InnerCategoryUnresolved {
            category: TypeCategory::Map
        }
    );
}

#[rstest]
#[case::unknown(Expression::apply("frobnicate", [int(1)]), OC0200)]
#[case::arity(Expression::apply("upper", [text("a"), text("b")]), OC0201)]
#[case::rejected(Expression::apply("upper", [int(1)]), OC0202)]
#[case::nested_rejection(
    Expression::apply(
        "length",
        [Expression::apply("upper", [Expression::leaf("x", TypeCategory::Uuid)])]
    ),
    OC0202
)]
fn test_tree_errors(
    catalog: OperationCatalog,
    #[case] expr: Expression,
    #[case] code: outcon_diagnostics::ErrorCode,
) {
    let err = ResolutionPass::new(&catalog).resolve(&expr).unwrap_err();
    assert_eq!(err.code(), code);
    assert_eq!(err.to_diagnostic().code, code);
}

#[rstest]
fn test_argument_checks_can_be_disabled(catalog: OperationCatalog) {
    let expr = Expression::apply("upper", [int(1)]);
    let tree = ResolutionPass::new(&catalog)
        .with_argument_checks(false)
        .resolve(&expr)
        .unwrap();
    assert_eq!(tree.root_type(), &ResolvedType::new(TypeCategory::Text));
}

#[rstest]
fn test_unchecked_element_of_scalar(catalog: OperationCatalog) {
    let expr = Expression::apply("array_get", [int(1), int(1)]);
    let err = ResolutionPass::new(&catalog)
        .with_argument_checks(false)
        .resolve(&expr)
        .unwrap_err();

    let TreeResolutionError::Resolution { source, .. } = err else {
        panic!("expected a resolution error");
    };
    assert_eq!(
        source.violation,
        StateViolation::NotAContainer {
            index: 0,
            category: TypeCategory::Integer
        }
    );
    assert_ne!(source.code(), OC0002);
}

#[rstest]
fn test_to_sql(catalog: OperationCatalog) {
    let expr = Expression::apply(
        "map_get",
        [Expression::apply("map_build", [text("k"), int(1)]), text("k")],
    );
    let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();
    assert_eq!(tree.to_sql(), "map['k' => 1] -> 'k'");

    let expr = Expression::apply("upper", [Expression::apply("concat", [text("a"), text("b")])]);
    let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();
    assert_eq!(tree.to_sql(), "UPPER(('a' || 'b'))");

    let range = Expression::leaf("INT4RANGE(1, 10)", TypeCategory::Range);
    let expr = Expression::apply("not", [Expression::apply("range_isempty", [range])]);
    let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();
    assert_eq!(tree.to_sql(), "NOT (isempty(INT4RANGE(1, 10)))");
}

#[rstest]
fn test_candidates_from_json(catalog: OperationCatalog) {
    let json = r#"
        {"op": "map_build", "args": [
            {"leaf": "'k'", "type": {"category": "text"}},
            {"leaf": "ARRAY[1]", "type": {"category": "array", "inner": {"element": "integer"}}}
        ]}
    "#;
    let candidates = outcon_resolve::candidates_from_json(json).unwrap();
    assert_eq!(candidates.len(), 1);

    let tree = ResolutionPass::new(&catalog).resolve(&candidates[0]).unwrap();
    // Containers take only the outer category of their argument
    assert_eq!(tree.root_type(), &ResolvedType::map_of(TypeCategory::Array));
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::select;

    proptest! {
        #[test]
        fn prop_map_value_follows_argument(category in select(TypeCategory::ALL.to_vec())) {
            let catalog = OperationCatalog::builtin().unwrap();
            let expr = Expression::apply("map_build", [text("k"), Expression::leaf("v", category)]);
            let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();
            prop_assert_eq!(tree.root_type().map_value_category(), Ok(category));
        }

        #[test]
        fn prop_dynamic_copies_whole_type(category in select(TypeCategory::ALL.to_vec())) {
            let catalog = OperationCatalog::builtin().unwrap();
            let leaf = Expression::leaf("v", ResolvedType::list_of(category));
            let expr = Expression::apply("nullif", [leaf.clone(), leaf]);
            let tree = ResolutionPass::new(&catalog).resolve(&expr).unwrap();
            prop_assert_eq!(tree.root_type(), &ResolvedType::list_of(category));
        }
    }
}
