//! The dynamic value type shared by both evaluators.
//!
//! `Value` is a closed tagged union. Everything that needs a number, a truth
//! value or text goes through the total conversions [`Value::as_number`],
//! [`Value::as_bool`] and [`Value::as_string`]; none of them fail. Lenient
//! results stand in for errors: a string that is not a number reads as NaN,
//! `Null` reads as false and as empty text.
//!
//! Arithmetic and ordering built on these conversions live in `ops`.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::ObjectRef;

/// Text form used when a date is stringified.
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runtime value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Arc<str>),
    Date(NaiveDateTime),
    Object(ObjectRef),
}

/// Type tag of a [`Value`], also used to describe host function signatures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Date,
    Object,
    /// Signature-only: accepts any value.
    Any,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Date => "date",
            ValueKind::Object => "object",
            ValueKind::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Factory methods

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    pub fn object(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Date(_) => ValueKind::Date,
            Value::Object(_) => ValueKind::Object,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Borrow string contents without conversion.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value.
    ///
    /// Booleans read as 1/0 and strings are parsed after trimming. Everything
    /// without a numeric reading, `Null` included, is NaN.
    #[allow(clippy::cast_precision_loss, reason = "i64 to f64 is the numeric promotion")]
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Integer(n) => *n as f64,
            Value::Float(f) => *f,
            Value::Boolean(b) => f64::from(u8::from(*b)),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::Null | Value::Date(_) | Value::Object(_) => f64::NAN,
        }
    }

    /// Truth value.
    ///
    /// Numbers are true when non-zero and not NaN; strings only when they
    /// spell `true` in any letter case; dates and objects are always true.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
            Value::Date(_) | Value::Object(_) => true,
        }
    }

    /// Text form used for concatenation and interpolation.
    ///
    /// `Null` is the empty string; integral floats print without a fraction.
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_DISPLAY_FORMAT)),
            Value::Object(o) => write!(f, "{}", o.type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}i"),
            Value::Float(x) => write!(f, "{x:?}f"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Date(d) => write!(f, "#{}#", d.format(DATE_DISPLAY_FORMAT)),
            Value::Object(o) => write!(f, "{o:?}"),
        }
    }
}

/// Structural equality.
///
/// Integers and floats compare by numeric value; NaN equals NaN so a value is
/// always equal to itself. Objects compare by identity.
impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss, reason = "numeric comparison across kinds")]
    #[allow(clippy::float_cmp, reason = "exact equality is the operator semantics")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(d: NaiveDateTime) -> Self {
        Value::Date(d)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
