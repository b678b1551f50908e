//! Text expressions end to end.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vox_eval::{interpolate, Expression, MapContext, Registry, Value};

use crate::common::{assert_nan, eval, eval_in};

#[test]
fn parentheses_override_precedence() {
    assert_eq!(eval("2 + 3 * 4"), Value::Integer(14));
    assert_eq!(eval("(2 + 3) * 4"), Value::Integer(20));
    assert_eq!(eval("2 * 3 + 4 * 5"), Value::Integer(26));
    assert_eq!(eval("1 + 2 > 2 and 3 < 4"), Value::Boolean(true));
}

#[test]
fn ternaries_nest_to_the_right() {
    assert_eq!(eval("true ? 1 : false ? 2 : 3"), Value::Integer(1));
    assert_eq!(eval("false ? 1 : true ? 2 : 3"), Value::Integer(2));
    assert_eq!(eval("true ? false ? 1 : 2 : 3"), Value::Integer(2));
}

#[test]
fn plus_is_concatenation_or_addition() {
    assert_eq!(eval("'a' + 'b'"), Value::string("ab"));
    assert_eq!(eval("1 + 2"), Value::Integer(3));
    assert_eq!(eval("'' + 1 + 2"), Value::string("12"));
}

#[test]
fn duck_typed_comparison() {
    assert_eq!(eval("5 > '3'"), Value::Boolean(true));
    assert_eq!(eval("Max(5, '3')"), Value::Integer(5));
    for op in [">", "<", ">=", "<="] {
        let source = format!("#2020-01-01# {op} 'not a date'");
        assert_eq!(eval(&source), Value::Boolean(false), "{source}");
    }
}

#[test]
fn nan_fields_compare_equal_to_themselves() {
    let ctx = MapContext::new().with("x", "abc");
    for (op, expected) in [(">=", true), ("<=", true), ("=", true), (">", false), ("<", false)] {
        let source = format!("[x] * 1 {op} [x] * 1");
        assert_eq!(eval_in(&source, &ctx), Value::Boolean(expected), "{source}");
    }
    assert_eq!(eval_in("[x] * 1 >= 1", &ctx), Value::Boolean(false));
}

#[test]
fn missing_fields() {
    let ctx = MapContext::new().with("hp", 3_i64);
    assert_eq!(eval_in("[gold]", &ctx), Value::Null);
    assert_nan(&eval_in("[gold] + 1", &ctx));
    assert_nan(&eval_in("[gold] * [hp]", &ctx));
    assert_nan(&eval_in("-gold", &ctx));
}

#[test]
fn empty_expressions_are_null() {
    let expression = Expression::new("");
    assert!(!expression.is_error());
    assert_eq!(expression.evaluate(&MapContext::new()), Value::Null);
}

#[test]
fn interpolation() {
    let ctx = MapContext::new().with("name", "World");
    assert_eq!(interpolate("Hello {name}!", &ctx), "Hello World!");
    assert_eq!(interpolate("Hello {name", &ctx), "Hello <error>");
}

#[test]
fn malformed_expressions_never_panic() {
    let ctx = MapContext::new();
    for source in ["(", ")", "1 +", "? :", ",", "Max(,)", "Max(1, + 2 [x])", "+ 2 3", "'open", "#open", "[open", "1 2", "@"] {
        let expression = Expression::new(source);
        assert!(expression.is_error(), "{source:?} should be invalid");
        assert_eq!(expression.evaluate(&ctx), Value::Null);
        assert!(!expression.evaluate_condition(&ctx));
    }
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        Just("2.5".to_string()),
        Just("true".to_string()),
        Just("null".to_string()),
        Just("'x'".to_string()),
        Just("[hp]".to_string()),
        Just("name".to_string()),
    ];
    leaf.prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec![
                    "+", "-", "*", "/", "=", "<>", "!=", "<", ">", "<=", ">=", "and", "or",
                ]),
                inner.clone(),
            )
                .prop_map(|(a, op, b)| format!("{a} {op} {b}")),
            inner.clone().prop_map(|a| format!("-{a}")),
            inner.clone().prop_map(|a| format!("({a})")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| format!("({c} ? {a} : {b})")),
            (inner.clone(), inner.clone(), inner).prop_map(|(a, b, c)| format!("Max({a}, {b}, {c})")),
        ]
    })
}

proptest! {
    #[test]
    fn printed_expressions_evaluate_like_their_source(source in expression()) {
        let registry = Registry::standard();
        let tree = vox_parse::parse_source(&source, &registry).unwrap().unwrap();
        let printed = tree.to_expression_string();

        let ctx = MapContext::new().with("hp", 7_i64).with("name", "Ada");
        let original = Expression::new(source.as_str()).try_evaluate(&ctx);
        let reparsed = Expression::new(printed.as_str()).try_evaluate(&ctx);
        prop_assert_eq!(original, reparsed, "printed as {}", printed);
    }
}
