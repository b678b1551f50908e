//! Arithmetic and duck-typed ordering over [`Value`].
//!
//! Both evaluators reach these through the registry's built-in operators, so
//! there is one coercion table for text expressions and block scripts alike.
//!
//! Integer operands stay integral while the result fits; anything else is
//! promoted to `f64`. Division always produces a float.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::Value;

/// Formats accepted when a string is compared against a date, tried in order.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y"];

/// Parse date text leniently.
///
/// Accepts RFC 3339, ISO-like date-times and a few day-first date forms.
/// Dates without a time are taken at midnight.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `+`: concatenation when the left operand is a string, numeric otherwise.
pub fn add(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::String(l), _) => {
            let mut text = String::with_capacity(l.len() + 8);
            text.push_str(l);
            text.push_str(&right.as_string());
            Value::from(text)
        }
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_add(*b)
            .map_or_else(|| float_op(left, right, |x, y| x + y), Value::Integer),
        _ => float_op(left, right, |x, y| x + y),
    }
}

pub fn subtract(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_sub(*b)
            .map_or_else(|| float_op(left, right, |x, y| x - y), Value::Integer),
        _ => float_op(left, right, |x, y| x - y),
    }
}

pub fn multiply(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_mul(*b)
            .map_or_else(|| float_op(left, right, |x, y| x * y), Value::Integer),
        _ => float_op(left, right, |x, y| x * y),
    }
}

/// IEEE division: `x / 0` is infinite, `0 / 0` is NaN.
pub fn divide(left: &Value, right: &Value) -> Value {
    float_op(left, right, |x, y| x / y)
}

pub fn negate(value: &Value) -> Value {
    match value {
        Value::Integer(n) => n
            .checked_neg()
            .map_or_else(|| Value::Float(-value.as_number()), Value::Integer),
        _ => Value::Float(-value.as_number()),
    }
}

#[inline]
fn float_op(left: &Value, right: &Value, op: impl FnOnce(f64, f64) -> f64) -> Value {
    Value::Float(op(left.as_number(), right.as_number()))
}

/// Duck-typed ordering.
///
/// Returns `None` when the operands are incomparable:
///
/// - equal values are `Equal`; equality treats NaN as equal to NaN, so NaN
///   against NaN is `Equal` and `>=` / `<=` hold
/// - `Null` against anything else is incomparable
/// - a numeric operand makes the comparison numeric; NaN against any other
///   number is incomparable
/// - dates compare chronologically; a string facing a date is parsed as one
/// - two strings compare ordinally
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    if left == right {
        return Some(Ordering::Equal);
    }
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        _ if left.is_numeric() || right.is_numeric() => {
            left.as_number().partial_cmp(&right.as_number())
        }
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::String(b)) => parse_date(b).map(|b| a.cmp(&b)),
        (Value::String(a), Value::Date(b)) => parse_date(a).map(|a| a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.as_ref().cmp(b.as_ref())),
        _ => None,
    }
}

pub fn greater(left: &Value, right: &Value) -> bool {
    compare(left, right) == Some(Ordering::Greater)
}

pub fn less(left: &Value, right: &Value) -> bool {
    compare(left, right) == Some(Ordering::Less)
}

pub fn greater_or_equal(left: &Value, right: &Value) -> bool {
    matches!(compare(left, right), Some(Ordering::Greater | Ordering::Equal))
}

pub fn less_or_equal(left: &Value, right: &Value) -> bool {
    matches!(compare(left, right), Some(Ordering::Less | Ordering::Equal))
}
