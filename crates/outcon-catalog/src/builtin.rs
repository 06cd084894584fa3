//! Built-in operations
//!
//! A representative slice of scalar functions and operators, one or more per
//! return-type shape.

use outcon_types::{CategorySlot, ReturnTypeSpec, TypeCategory};

use crate::{Operation, ParamCategory};

use ParamCategory::Any;
use TypeCategory::{
    Array, Boolean, Bytea, DateTime, Integer, Interval, Jsonb, List, Map, Numeric, Range, Text,
    Uuid,
};

fn of(category: TypeCategory) -> ParamCategory {
    ParamCategory::Of(category)
}

fn arg(index: usize) -> CategorySlot {
    CategorySlot::argument(index)
}

pub(crate) fn builtin_operations() -> Vec<Operation> {
    vec![
        // === Numeric ===
        Operation::new("abs", [of(Numeric)], ReturnTypeSpec::dynamic(0)),
        Operation::new("add", [of(Numeric), of(Numeric)], ReturnTypeSpec::dynamic(0))
            .with_pattern("$ + $"),
        Operation::new("round", [of(Numeric)], ReturnTypeSpec::fixed(Numeric)),
        Operation::new("mod", [of(Integer), of(Integer)], ReturnTypeSpec::fixed(Integer))
            .with_pattern("$ % $"),
        // === Text ===
        Operation::new("upper", [of(Text)], ReturnTypeSpec::fixed(Text)),
        Operation::new("length", [of(Text)], ReturnTypeSpec::fixed(Integer)),
        Operation::new("concat", [of(Text), of(Text)], ReturnTypeSpec::fixed(Text))
            .with_pattern("$ || $"),
        Operation::new("md5", [of(Text)], ReturnTypeSpec::fixed(Text)),
        Operation::new("decode", [of(Text), of(Text)], ReturnTypeSpec::fixed(Bytea)),
        Operation::new(
            "regexp_match",
            [of(Text), of(Text)],
            ReturnTypeSpec::array_of(Text),
        ),
        Operation::new(
            "string_to_array",
            [of(Text), of(Text)],
            ReturnTypeSpec::array_of(Text),
        ),
        // === Boolean and comparison ===
        Operation::new("not", [of(Boolean)], ReturnTypeSpec::fixed(Boolean))
            .with_pattern("NOT ($)"),
        Operation::new("eq", [Any, Any], ReturnTypeSpec::fixed(Boolean)).with_pattern("$ = $"),
        Operation::new("is_null", [Any], ReturnTypeSpec::fixed(Boolean))
            .with_pattern("($) IS NULL"),
        // === Generic ===
        Operation::new("coalesce", [Any, Any], ReturnTypeSpec::dynamic(0)),
        Operation::new("greatest", [Any, Any], ReturnTypeSpec::dynamic(0)),
        Operation::new("nullif", [Any, Any], ReturnTypeSpec::dynamic(0)),
        // === Date and time ===
        Operation::new("date_trunc", [of(Text), of(DateTime)], ReturnTypeSpec::fixed(DateTime)),
        Operation::new("age", [of(DateTime), of(DateTime)], ReturnTypeSpec::fixed(Interval)),
        // === Arrays and lists ===
        Operation::new("array_build", [Any], ReturnTypeSpec::array_of(arg(0)))
            .with_pattern("ARRAY[$]"),
        Operation::new("array_get", [of(Array), of(Integer)], ReturnTypeSpec::element_of(0))
            .with_pattern("($)[$]"),
        Operation::new("array_length", [of(Array)], ReturnTypeSpec::fixed(Integer))
            .with_pattern("array_length($, 1)"),
        Operation::new("array_to_string", [of(Array), of(Text)], ReturnTypeSpec::fixed(Text)),
        Operation::new("list_build", [Any], ReturnTypeSpec::list_of(arg(0)))
            .with_pattern("LIST[$]"),
        Operation::new("list_length", [of(List)], ReturnTypeSpec::fixed(Integer)),
        // === Maps ===
        Operation::new("map_build", [of(Text), Any], ReturnTypeSpec::map(arg(1)))
            .with_pattern("map[$ => $]"),
        Operation::new("map_get", [of(Map), of(Text)], ReturnTypeSpec::element_of(0))
            .with_pattern("$ -> $"),
        Operation::new("map_length", [of(Map)], ReturnTypeSpec::fixed(Integer)),
        Operation::new("map_contains_key", [of(Map), of(Text)], ReturnTypeSpec::fixed(Boolean))
            .with_pattern("$ ? $"),
        // === Records ===
        Operation::new("row", [Any, Any], ReturnTypeSpec::record([arg(0), arg(1)])),
        Operation::new(
            "row_with_ordinal",
            [Any],
            ReturnTypeSpec::record([arg(0), CategorySlot::fixed(Integer)]),
        )
        .with_pattern("ROW($, 1)"),
        // === Ranges ===
        Operation::new("range_lower", [of(Range)], ReturnTypeSpec::element_of(0))
            .with_pattern("lower($)"),
        Operation::new("range_isempty", [of(Range)], ReturnTypeSpec::fixed(Boolean))
            .with_pattern("isempty($)"),
        // === Jsonb and identifiers ===
        Operation::new("to_jsonb", [Any], ReturnTypeSpec::fixed(Jsonb)),
        Operation::new("jsonb_typeof", [of(Jsonb)], ReturnTypeSpec::fixed(Text)),
        Operation::new("uuid_to_text", [of(Uuid)], ReturnTypeSpec::fixed(Text))
            .with_pattern("($)::text"),
    ]
}
