use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use vox_runtime::{errors::host_error, EmptyContext, MapContext, RegistryBuilder};

use super::*;

fn eval(source: &str) -> Value {
    evaluate_str(source, &EmptyContext).unwrap_or_else(|err| panic!("{source:?}: {err}"))
}

fn eval_in(source: &str, ctx: &MapContext) -> Value {
    evaluate_str(source, ctx).unwrap_or_else(|err| panic!("{source:?}: {err}"))
}

// === Evaluation ===

#[test]
fn precedence_and_grouping() {
    assert_eq!(eval("2 + 3 * 4"), Value::Integer(14));
    assert_eq!(eval("(2 + 3) * 4"), Value::Integer(20));
    assert_eq!(eval("10 - 4 - 3"), Value::Integer(3));
    assert_eq!(eval("-2 * 3"), Value::Integer(-6));
    assert_eq!(eval("2 - -1"), Value::Integer(3));
    assert_eq!(eval("7 / 2"), Value::Float(3.5));
}

#[test]
fn ternary_is_right_associative() {
    assert_eq!(eval("true ? 1 : false ? 2 : 3"), Value::Integer(1));
    assert_eq!(eval("false ? 1 : true ? 2 : 3"), Value::Integer(2));
    assert_eq!(eval("false ? 1 : false ? 2 : 3"), Value::Integer(3));
    assert_eq!(eval("1 + 1 = 2 ? 'yes' : 'no'"), Value::string("yes"));
}

#[test]
fn plus_concatenates_after_a_string() {
    assert_eq!(eval("'a' + 'b'"), Value::string("ab"));
    assert_eq!(eval("'hp: ' + 3"), Value::string("hp: 3"));
    assert_eq!(eval("1 + 2"), Value::Integer(3));
}

#[test]
fn comparisons() {
    assert_eq!(eval("5 > '3'"), Value::Boolean(true));
    assert_eq!(eval("'apple' < 'banana'"), Value::Boolean(true));
    assert_eq!(eval("#2020-01-01# < '2021-06-01'"), Value::Boolean(true));
    for op in [">", "<", ">=", "<="] {
        let source = format!("#2020-01-01# {op} 'not a date'");
        assert_eq!(eval(&source), Value::Boolean(false), "{source}");
    }
    assert_eq!(eval("1 = 1.0"), Value::Boolean(true));
    assert_eq!(eval("1 <> 2 and 2 != 3"), Value::Boolean(true));
}

#[test]
fn missing_fields_are_null_and_arithmetic_degrades_to_nan() {
    let ctx = MapContext::new().with("hp", 4_i64);
    assert_eq!(eval_in("[hp] * 2", &ctx), Value::Integer(8));
    assert_eq!(eval_in("[mana]", &ctx), Value::Null);
    match eval_in("[mana] + 1", &ctx) {
        Value::Float(x) => assert!(x.is_nan()),
        other => panic!("expected NaN, got {other:?}"),
    }
    assert_eq!(eval_in("IsNull(mana)", &ctx), Value::Boolean(true));
}

#[test]
fn empty_source_is_null() {
    assert_eq!(eval(""), Value::Null);
    assert_eq!(eval("   "), Value::Null);
}

#[test]
fn boolean_operators_evaluate_both_sides() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut builder = RegistryBuilder::with_standard_library();
    builder
        .function0("Tick", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();
    let expression = Expression::with_registry("false and Tick() or Tick()", builder.build_shared());
    assert_eq!(expression.evaluate(&EmptyContext), Value::Boolean(true));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// === Expression ===

#[test]
fn invalid_sources_are_flagged() {
    let expression = Expression::new("1 +");
    assert!(expression.is_error());
    assert!(matches!(expression.error(), Some(ExpressionError::Syntax(_))));
    assert_eq!(expression.evaluate(&EmptyContext), Value::Null);

    let expression = Expression::new("Nope(1)");
    assert!(matches!(expression.error(), Some(ExpressionError::Compile(_))));
    assert!(expression.root().is_none());
}

#[test]
fn empty_sources_are_valid() {
    let expression = Expression::new("");
    assert!(!expression.is_error());
    assert!(expression.is_empty());
    assert_eq!(expression.try_evaluate(&EmptyContext), Ok(Value::Null));
}

#[test]
fn set_source_recompiles_on_change_only() {
    let mut expression = Expression::new("1 +");
    assert!(expression.is_error());
    assert!(!expression.set_source("1 +"));
    assert!(expression.set_source("1 + 1"));
    assert!(!expression.is_error());
    assert_eq!(expression.source(), "1 + 1");
    assert_eq!(expression.evaluate(&EmptyContext), Value::Integer(2));
}

#[test]
fn conditions() {
    let ctx = MapContext::new().with("hp", 5_i64);
    assert!(Expression::new("hp > 3").evaluate_condition(&ctx));
    assert!(!Expression::new("hp > 9").evaluate_condition(&ctx));
    assert!(Expression::new("'not a boolean'").evaluate_condition(&ctx));
    assert!(Expression::new("").evaluate_condition(&ctx));
    assert!(!Expression::new("Nope()").evaluate_condition(&ctx));
    assert!(!Expression::new("hp >").evaluate_condition(&ctx));
}

#[test]
fn evaluation_errors() {
    let mut builder = RegistryBuilder::with_standard_library();
    builder
        .function1("Fail", |message: String| -> Result<bool, EvalError> {
            Err(host_error(message))
        })
        .unwrap();
    let expression = Expression::with_registry("Fail('boom')", builder.build_shared());
    assert!(!expression.is_error());
    assert_eq!(
        expression.try_evaluate(&EmptyContext).unwrap_err().to_string(),
        "boom"
    );
    assert_eq!(expression.evaluate(&EmptyContext), Value::Null);
    assert!(!expression.evaluate_condition(&EmptyContext));
}

#[test]
fn evaluate_str_reports_every_phase() {
    assert!(matches!(
        evaluate_str("'open", &EmptyContext),
        Err(ExpressionError::Syntax(SyntaxError::Lex(_)))
    ));
    assert!(matches!(
        evaluate_str("(1", &EmptyContext),
        Err(ExpressionError::Syntax(SyntaxError::Parse(_)))
    ));
    assert!(matches!(
        evaluate_str("Nope()", &EmptyContext),
        Err(ExpressionError::Compile(_))
    ));
}
