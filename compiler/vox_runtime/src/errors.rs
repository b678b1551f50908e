//! Evaluation-time errors.
//!
//! Coercion failures are not errors here: they produce NaN, `false` or
//! `Null`. `EvalError` covers the cases a lenient value cannot paper over,
//! such as calling a routine with the wrong number of arguments or a host
//! function refusing its input.

use crate::registry::Arity;
use crate::{Value, ValueKind};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: Arity,
        got: usize,
    },
    #[error("argument {index} of `{name}` must be {expected}, got {got}")]
    ArgumentType {
        name: String,
        index: usize,
        expected: ValueKind,
        got: ValueKind,
    },
    /// Raised by a host function.
    #[error("{message}")]
    Host { message: String },
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }
}

// Factory functions

pub fn arity_mismatch(name: &str, expected: Arity, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
    .into()
}

pub fn argument_type(name: &str, index: usize, expected: ValueKind, got: ValueKind) -> EvalError {
    EvalErrorKind::ArgumentType {
        name: name.to_string(),
        index,
        expected,
        got,
    }
    .into()
}

/// Error raised by host code.
pub fn host_error(message: impl Into<String>) -> EvalError {
    EvalErrorKind::Host {
        message: message.into(),
    }
    .into()
}
