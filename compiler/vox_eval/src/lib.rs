//! Vox Eval - compiler and tree-walking evaluator for text expressions.
//!
//! # Pipeline
//!
//! ```text
//! source --vox_lexer--> tokens --vox_parse--> AstNode --compile--> EvalNode --evaluate--> Value
//! ```
//!
//! [`compile`] resolves every operator and function against a [`Registry`]
//! once, so evaluating an [`EvalNode`] never looks anything up by name.
//! [`Expression`] bundles the pipeline behind a validity flag for hosts that
//! must never fail on a malformed formula, and [`interpolate`] renders
//! `{expr}` spans inside text.
//!
//! # Re-exports
//!
//! Runtime types from `vox_runtime` are re-exported so hosts can depend on
//! this crate alone: `Value`, `EvalContext`, `MapContext`, `Registry`, ...

mod compile;
mod eval;
mod expression;
mod interpolate;
mod node;

pub use compile::{compile, CompileError, CompileErrorKind};
pub use eval::{condition_passes, evaluate};
pub use expression::{evaluate_str, Expression, ExpressionError};
pub use interpolate::{interpolate, interpolate_with, ERROR_MARKER};
pub use node::EvalNode;

pub use vox_runtime::{
    EmptyContext, EvalContext, EvalError, EvalErrorKind, EvalResult, HostObject, MapContext,
    ObjectRef, ReflectionContext, Registry, RegistryBuilder, SharedRegistry, Value, ValueKind,
};
