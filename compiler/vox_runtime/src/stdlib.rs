//! Built-in operators and functions.
//!
//! Operator shapes come from `vox_ir::standard_operators`, so the lexer's
//! fallback table and the registry can never disagree on precedence.
//! Every routine receives operands that are already evaluated.

use chrono::Local;
use vox_ir::{standard_operators, TERNARY, UNARY_MINUS};

use crate::errors::arity_mismatch;
use crate::registry::{Arity, FunctionInfo, OperatorInfo, RegistryBuilder};
use crate::{ops, EvalContext, EvalError, EvalResult, Value, ValueKind};

type Routine = fn(&dyn EvalContext, &[Value]) -> EvalResult;

pub(crate) fn install(builder: &mut RegistryBuilder) {
    for &(name, spec) in standard_operators() {
        if let Some(routine) = operator_routine(name) {
            builder.insert_operator(OperatorInfo::new(name, spec, routine));
        }
    }

    builder.insert_function(
        FunctionInfo::new("Max", Arity::Variadic { min: 1 }, max).with_signature(Vec::new(), ValueKind::Any),
    );
    builder.insert_function(
        FunctionInfo::new("Min", Arity::Variadic { min: 1 }, min).with_signature(Vec::new(), ValueKind::Any),
    );
    builder.insert_function(
        FunctionInfo::new("Not", Arity::Fixed(1), not)
            .with_signature(vec![ValueKind::Any], ValueKind::Boolean),
    );
    builder.insert_function(
        FunctionInfo::new("IsNull", Arity::Fixed(1), is_null)
            .with_signature(vec![ValueKind::Any], ValueKind::Boolean),
    );
    builder.insert_function(
        FunctionInfo::new("Now", Arity::Fixed(0), now).with_signature(Vec::new(), ValueKind::Date),
    );
}

fn operator_routine(name: &str) -> Option<Routine> {
    let routine: Routine = match name {
        UNARY_MINUS => |_, args| {
            let [x] = operands::<1>("-", args)?;
            Ok(ops::negate(x))
        },
        "*" => |_, args| binary("*", args, ops::multiply),
        "/" => |_, args| binary("/", args, ops::divide),
        "+" => |_, args| binary("+", args, ops::add),
        "-" => |_, args| binary("-", args, ops::subtract),
        ">" => |_, args| compare(">", args, ops::greater),
        "<" => |_, args| compare("<", args, ops::less),
        ">=" => |_, args| compare(">=", args, ops::greater_or_equal),
        "<=" => |_, args| compare("<=", args, ops::less_or_equal),
        "=" => |_, args| compare("=", args, |a, b| a == b),
        "<>" | "!=" => |_, args| compare("<>", args, |a, b| a != b),
        "and" => |_, args| Ok(Value::Boolean(args.iter().all(Value::as_bool))),
        "or" => |_, args| Ok(Value::Boolean(args.iter().any(Value::as_bool))),
        TERNARY => |_, args| {
            let [cond, then, otherwise] = operands::<3>("?:", args)?;
            Ok(if cond.as_bool() { then.clone() } else { otherwise.clone() })
        },
        _ => return None,
    };
    Some(routine)
}

fn operands<'a, const N: usize>(op: &str, args: &'a [Value]) -> Result<&'a [Value; N], EvalError> {
    <&[Value; N]>::try_from(args).map_err(|_| arity_mismatch(op, Arity::Fixed(N), args.len()))
}

fn binary(op: &str, args: &[Value], apply: fn(&Value, &Value) -> Value) -> EvalResult {
    let [left, right] = operands::<2>(op, args)?;
    Ok(apply(left, right))
}

fn compare(op: &str, args: &[Value], test: fn(&Value, &Value) -> bool) -> EvalResult {
    let [left, right] = operands::<2>(op, args)?;
    Ok(Value::Boolean(test(left, right)))
}

/// The argument that compares greatest. Incomparable arguments never win.
fn max(_: &dyn EvalContext, args: &[Value]) -> EvalResult {
    pick(args, "Max", ops::greater)
}

fn min(_: &dyn EvalContext, args: &[Value]) -> EvalResult {
    pick(args, "Min", ops::less)
}

fn pick(args: &[Value], name: &str, better: fn(&Value, &Value) -> bool) -> EvalResult {
    let Some((first, rest)) = args.split_first() else {
        return Err(arity_mismatch(name, Arity::Variadic { min: 1 }, 0));
    };
    let best = rest
        .iter()
        .fold(first, |best, candidate| if better(candidate, best) { candidate } else { best });
    Ok(best.clone())
}

fn not(_: &dyn EvalContext, args: &[Value]) -> EvalResult {
    let [x] = operands::<1>("Not", args)?;
    Ok(Value::Boolean(!x.as_bool()))
}

fn is_null(_: &dyn EvalContext, args: &[Value]) -> EvalResult {
    let [x] = operands::<1>("IsNull", args)?;
    Ok(Value::Boolean(x.is_null()))
}

fn now(_: &dyn EvalContext, _: &[Value]) -> EvalResult {
    Ok(Value::Date(Local::now().naive_local()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{EmptyContext, Registry, Value};

    fn call(name: &str, args: &[Value]) -> Value {
        let registry = Registry::standard();
        let result = if let Some(op) = registry.find_operator(name) {
            op.call(&EmptyContext, args)
        } else if let Some(func) = registry.find_function(name) {
            func.call(&EmptyContext, args)
        } else {
            panic!("no built-in named {name}");
        };
        result.unwrap_or_else(|err| panic!("{name} failed: {err}"))
    }

    #[test]
    fn every_standard_operator_is_installed() {
        let registry = Registry::standard();
        for (name, spec) in vox_ir::standard_operators() {
            let op = registry
                .find_operator(name)
                .unwrap_or_else(|| panic!("missing operator {name}"));
            assert_eq!(op.spec(), *spec);
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(call("+", &[Value::Float(1.0), Value::Float(2.0)]), Value::Float(3.0));
        assert_eq!(call("*", &[Value::Integer(6), Value::Integer(7)]), Value::Integer(42));
        assert_eq!(call("~-", &[Value::Float(2.5)]), Value::Float(-2.5));
        assert_eq!(call("/", &[Value::Integer(7), Value::Integer(2)]), Value::Float(3.5));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(call("+", &[Value::string("a"), Value::string("b")]), Value::string("ab"));
        assert_eq!(call("+", &[Value::string("hp: "), Value::Integer(3)]), Value::string("hp: 3"));
    }

    #[test]
    fn logic_does_not_short_circuit_values() {
        assert_eq!(call("and", &[Value::Boolean(true), Value::Integer(1)]), Value::Boolean(true));
        assert_eq!(call("or", &[Value::Null, Value::Boolean(false)]), Value::Boolean(false));
    }

    #[test]
    fn not_equal_spellings_agree() {
        let args = [Value::Integer(1), Value::Float(1.0)];
        assert_eq!(call("<>", &args), Value::Boolean(false));
        assert_eq!(call("!=", &args), Value::Boolean(false));
        assert_eq!(call("=", &args), Value::Boolean(true));
    }

    #[test]
    fn ternary_selects() {
        let args = [Value::Boolean(false), Value::Integer(1), Value::Integer(2)];
        assert_eq!(call("?:", &args), Value::Integer(2));
    }

    #[test]
    fn max_and_min() {
        let args = [Value::Integer(3), Value::Float(7.5), Value::string("5")];
        assert_eq!(call("Max", &args), Value::Float(7.5));
        assert_eq!(call("MIN", &args), Value::Integer(3));
        assert_eq!(call("max", &[Value::Null, Value::Integer(1)]), Value::Null);
    }

    #[test]
    fn not_and_is_null() {
        assert_eq!(call("Not", &[Value::Boolean(true)]), Value::Boolean(false));
        assert_eq!(call("Not", &[Value::Null]), Value::Boolean(true));
        assert_eq!(call("IsNull", &[Value::Null]), Value::Boolean(true));
        assert_eq!(call("IsNull", &[Value::Integer(0)]), Value::Boolean(false));
    }

    #[test]
    fn now_is_a_date() {
        assert!(matches!(call("Now", &[]), Value::Date(_)));
    }
}
