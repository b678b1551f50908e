//! Script compilation and execution errors.
//!
//! Compilation errors carry the index of the offending block.

use vox_runtime::{Arity, EvalError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("block {index}: unknown function `{name}`")]
    UnknownFunction { index: usize, name: String },
    #[error("block {index}: unknown object `{id}`")]
    UnknownObject { index: usize, id: String },
    #[error("block {index}: `{name}` takes a variable number of arguments, declare an arity")]
    ArityRequired { index: usize, name: String },
    #[error("block {index}: `{name}` expects {expected} argument(s), declared {got}")]
    ArityMismatch {
        index: usize,
        name: String,
        expected: Arity,
        got: usize,
    },
    #[error("script ended at block {index} while arguments were still expected")]
    Truncated { index: usize },
    #[error("block {index}: calls nested deeper than {limit}")]
    TooDeep { index: usize, limit: usize },
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl ScriptError {
    /// Index of the block the error points at, for compile-time errors.
    pub fn block_index(&self) -> Option<usize> {
        match self {
            ScriptError::UnknownFunction { index, .. }
            | ScriptError::UnknownObject { index, .. }
            | ScriptError::ArityRequired { index, .. }
            | ScriptError::ArityMismatch { index, .. }
            | ScriptError::Truncated { index }
            | ScriptError::TooDeep { index, .. } => Some(*index),
            ScriptError::Eval(_) => None,
        }
    }
}
