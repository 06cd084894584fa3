//! Purity tests: a shared specification never carries state from one
//! resolution into the next, sequentially or across threads.

use outcon_types::*;
use proptest::prelude::*;
use std::sync::Arc;

fn any_category() -> impl Strategy<Value = TypeCategory> {
    proptest::sample::select(TypeCategory::ALL.to_vec())
}

#[test]
fn test_map_spec_resolved_twice_with_different_evidence() {
    let spec = ReturnTypeSpec::map(CategorySlot::argument(0));

    let first = spec
        .resolve(&ArgumentEvidence::new().with(0, TypeCategory::Text))
        .unwrap();
    let second = spec
        .resolve(&ArgumentEvidence::new().with(0, TypeCategory::Integer))
        .unwrap();

    assert_eq!(first.category(), TypeCategory::Map);
    assert_eq!(first.map_value_category(), Ok(TypeCategory::Text));
    assert_eq!(second.category(), TypeCategory::Map);
    assert_eq!(second.map_value_category(), Ok(TypeCategory::Integer));
    assert_eq!(spec, ReturnTypeSpec::map(CategorySlot::argument(0)));
}

#[test]
fn test_concurrent_resolutions_of_shared_spec() {
    let spec = Arc::new(ReturnTypeSpec::array_of(CategorySlot::argument(1)));

    let results: Vec<(TypeCategory, ResolvedType)> = std::thread::scope(|scope| {
        let handles: Vec<_> = TypeCategory::ALL
            .into_iter()
            .map(|category| {
                let spec = Arc::clone(&spec);
                scope.spawn(move || {
                    let mut last = None;
                    for _ in 0..200 {
                        let evidence = ArgumentEvidence::new()
                            .with(0, TypeCategory::Bytea)
                            .with(1, category);
                        last = Some(spec.resolve(&evidence).unwrap());
                    }
                    (category, last.unwrap())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.len(), TypeCategory::ALL.len());
    for (category, resolved) in results {
        assert_eq!(resolved, ResolvedType::array_of(category));
    }
}

proptest! {
    #[test]
    fn prop_map_value_follows_latest_evidence(first in any_category(), second in any_category()) {
        let spec = ReturnTypeSpec::map(CategorySlot::argument(0));
        let _ = spec.resolve(&ArgumentEvidence::new().with(0, first)).unwrap();
        let resolved = spec.resolve(&ArgumentEvidence::new().with(0, second)).unwrap();
        prop_assert_eq!(resolved.map_value_category(), Ok(second));
    }

    #[test]
    fn prop_fixed_round_trip(
        declared in any_category(),
        noise in proptest::collection::vec((0usize..6, any_category()), 0..6),
    ) {
        let spec = ReturnTypeSpec::fixed(declared);
        let evidence: ArgumentEvidence = noise.into_iter().collect();
        prop_assert_eq!(spec.resolve(&evidence).unwrap().category(), declared);
    }

    #[test]
    fn prop_record_fields_copy_their_own_index(
        categories in proptest::collection::vec(any_category(), 1..6)
    ) {
        let spec = ReturnTypeSpec::record((0..categories.len()).rev().map(CategorySlot::argument));
        let evidence: ArgumentEvidence = categories.iter().copied().enumerate().collect();

        let resolved = spec.resolve(&evidence).unwrap();
        let expected: Vec<TypeCategory> = categories.iter().rev().copied().collect();
        prop_assert_eq!(resolved.field_categories().unwrap(), expected.as_slice());
    }

    #[test]
    fn prop_dynamic_returns_evidence_verbatim(category in any_category(), index in 0usize..4) {
        let spec = ReturnTypeSpec::dynamic(index);
        let evidence = ArgumentEvidence::new().with(index, category);
        prop_assert_eq!(spec.resolve(&evidence).unwrap(), ResolvedType::new(category));
    }
}
