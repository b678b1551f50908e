//! Shared helpers for phase tests.

use vox_eval::{evaluate_str, EmptyContext, EvalContext, Value};

/// Evaluate `source` with no fields, panicking on any error.
pub fn eval(source: &str) -> Value {
    eval_in(source, &EmptyContext)
}

pub fn eval_in(source: &str, ctx: &dyn EvalContext) -> Value {
    evaluate_str(source, ctx).unwrap_or_else(|err| panic!("{source:?} failed: {err}"))
}

pub fn assert_nan(value: &Value) {
    match value {
        Value::Float(x) => assert!(x.is_nan(), "expected NaN, got {x}"),
        other => panic!("expected NaN, got {other:?}"),
    }
}
