//! Conversions between [`Value`] and Rust types for typed host functions.
//!
//! Argument extraction is strict about kind, unlike the operator coercions:
//! a host function declared over `bool` rejects a string with
//! `EvalErrorKind::ArgumentType` instead of guessing. The only widening is
//! integer to float, and integral floats to integers, since number literals
//! in text expressions are always floats.

use chrono::NaiveDateTime;

use crate::{EvalError, EvalResult, ObjectRef, Value, ValueKind};

/// Extract a Rust value from an argument.
pub trait FromValue: Sized {
    /// Kind recorded in the function's signature.
    const KIND: ValueKind;

    fn from_value(value: &Value) -> Option<Self>;
}

/// Convert a Rust value into a result value.
pub trait IntoValue {
    const KIND: ValueKind;

    fn into_value(self) -> Value;
}

/// Return type of a typed host function: a value, or a fallible value.
pub trait IntoEvalResult {
    const KIND: ValueKind;

    fn into_eval_result(self) -> EvalResult;
}

impl<T: IntoValue> IntoEvalResult for Result<T, EvalError> {
    const KIND: ValueKind = T::KIND;

    fn into_eval_result(self) -> EvalResult {
        self.map(IntoValue::into_value)
    }
}

impl FromValue for Value {
    const KIND: ValueKind = ValueKind::Any;

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        reason = "guarded by the range and fract checks"
    )]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(*n),
            Value::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.is_numeric().then(|| value.as_number())
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::Date;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromValue for ObjectRef {
    const KIND: ValueKind = ValueKind::Object;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(o) => Some(o.clone()),
            _ => None,
        }
    }
}

/// `Null` maps to `None`; anything else must convert to `T`.
impl<T: FromValue> FromValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl IntoValue for Value {
    const KIND: ValueKind = ValueKind::Any;

    fn into_value(self) -> Value {
        self
    }
}

/// Actions return nothing.
impl IntoValue for () {
    const KIND: ValueKind = ValueKind::Null;

    fn into_value(self) -> Value {
        Value::Null
    }
}

macro_rules! into_value_via_from {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

macro_rules! infallible_result {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoEvalResult for $ty {
                const KIND: ValueKind = <$ty as IntoValue>::KIND;

                fn into_eval_result(self) -> EvalResult {
                    Ok(self.into_value())
                }
            }
        )*
    };
}

into_value_via_from! {
    bool => Boolean,
    i64 => Integer,
    i32 => Integer,
    f64 => Float,
    String => String,
    &str => String,
    NaiveDateTime => Date,
    ObjectRef => Object,
}

impl<T: IntoValue> IntoValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

infallible_result!(Value, (), bool, i64, i32, f64, String, &str, NaiveDateTime, ObjectRef);

impl<T: IntoValue> IntoEvalResult for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn into_eval_result(self) -> EvalResult {
        Ok(self.into_value())
    }
}
