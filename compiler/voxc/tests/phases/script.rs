//! Block scripts, and their agreement with text expressions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use vox_eval::{EmptyContext, Registry, RegistryBuilder, Value};
use vox_script::{evaluate_condition, run_action, Block, Script, ScriptEnv, ScriptError};

use crate::common::eval;

fn literal(value: &Value) -> Block {
    match value {
        Value::Boolean(b) => Block::Boolean(*b),
        Value::Integer(n) => Block::Integer(*n),
        Value::Float(x) => Block::Float(*x),
        Value::String(s) => Block::string(&**s),
        other => panic!("no literal block for {other:?}"),
    }
}

#[test]
fn both_encodings_share_one_coercion_table() {
    let registry = Registry::standard();
    let env = ScriptEnv::new(&registry);
    let cases = [
        ("+", Value::string("a"), Value::Integer(1), "'a' + 1"),
        ("+", Value::Integer(1), Value::string("2"), "1 + '2'"),
        ("-", Value::Integer(7), Value::Float(0.5), "7 - 0.5"),
        (">", Value::Integer(5), Value::string("3"), "5 > '3'"),
        ("<", Value::string("apple"), Value::string("banana"), "'apple' < 'banana'"),
        ("=", Value::Integer(1), Value::Float(1.0), "1 = 1.0"),
        ("and", Value::Boolean(true), Value::Integer(0), "true and 0"),
        ("or", Value::string("TRUE"), Value::Boolean(false), "'TRUE' or false"),
        ("Max", Value::Integer(2), Value::string("10"), "Max(2, '10')"),
    ];
    for (op, left, right, text) in cases {
        let script = Script::new(vec![Block::call(op, 2), literal(&left), literal(&right)]);
        let compiled = script.compile(&env).unwrap();
        assert_eq!(compiled.evaluate(&EmptyContext), Ok(eval(text)), "{text}");
    }
}

#[test]
fn unknown_functions_fail_softly_at_the_host_boundary() {
    let registry = Registry::standard();
    let env = ScriptEnv::new(&registry);
    let script = Script::new(vec![Block::call("SpawnDragon", 0)]);

    run_action(&script, &env, &EmptyContext);
    assert!(!evaluate_condition(&script, &env, &EmptyContext));
    assert!(matches!(
        script.execute(&env, &EmptyContext),
        Err(ScriptError::UnknownFunction { index: 0, .. })
    ));
}

#[test]
fn only_conditions_short_circuit() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut builder = RegistryBuilder::with_standard_library();
    builder
        .function0("Touch", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    let registry = builder.build();
    let env = ScriptEnv::new(&registry);
    let script = Script::new(vec![
        Block::call("Touch", 0),
        Block::call("=", 2),
        Block::Integer(1),
        Block::Integer(2),
        Block::call("Touch", 0),
    ]);

    assert!(!evaluate_condition(&script, &env, &EmptyContext));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    run_action(&script, &env, &EmptyContext);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn scripts_round_trip_through_json() {
    let script = Script::new(vec![
        Block::call("not", 1),
        Block::call("<", 2),
        Block::Float(1.5),
        Block::Integer(1),
    ]);
    let json = serde_json::to_string(&script).unwrap();
    let loaded: Script = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, script);

    let registry = Registry::standard();
    assert!(evaluate_condition(&loaded, &ScriptEnv::new(&registry), &EmptyContext));
}
