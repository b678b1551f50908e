//! Compiled text expressions with a validity flag.

use std::fmt;

use tracing::{debug, warn};
use vox_parse::SyntaxError;
use vox_runtime::{EvalContext, EvalError, EvalResult, Registry, SharedRegistry, Value};

use crate::{compile, condition_passes, CompileError, EvalNode};

/// Why an expression could not be built or evaluated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// A text expression compiled once and evaluated on demand.
///
/// Construction never fails. A malformed source sets [`is_error`] and the
/// expression evaluates to `Null`; so does an empty source, which is valid.
///
/// [`is_error`]: Expression::is_error
pub struct Expression {
    source: String,
    registry: SharedRegistry,
    root: Option<EvalNode>,
    error: Option<ExpressionError>,
}

impl Expression {
    /// Compile `source` against the standard registry.
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_registry(source, Registry::standard())
    }

    pub fn with_registry(source: impl Into<String>, registry: SharedRegistry) -> Self {
        let mut expression = Expression {
            source: source.into(),
            registry,
            root: None,
            error: None,
        };
        expression.rebuild();
        expression
    }

    /// Replace the source text. Recompiles only when the text changed;
    /// returns whether it did.
    pub fn set_source(&mut self, source: &str) -> bool {
        if self.source == source {
            return false;
        }
        source.clone_into(&mut self.source);
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        match compile_source(&self.source, &self.registry) {
            Ok(root) => {
                self.root = root;
                self.error = None;
            }
            Err(err) => {
                debug!(source = %self.source, error = %err, "invalid expression");
                self.root = None;
                self.error = Some(err);
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Valid, but without any tokens.
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.root.is_none()
    }

    pub fn error(&self) -> Option<&ExpressionError> {
        self.error.as_ref()
    }

    pub fn root(&self) -> Option<&EvalNode> {
        self.root.as_ref()
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Evaluate, reporting evaluation errors. Invalid and empty expressions
    /// yield `Null`.
    pub fn try_evaluate(&self, ctx: &dyn EvalContext) -> EvalResult {
        match &self.root {
            Some(root) => root.evaluate(ctx),
            None => Ok(Value::Null),
        }
    }

    /// Evaluate, degrading evaluation errors to `Null`.
    pub fn evaluate(&self, ctx: &dyn EvalContext) -> Value {
        self.try_evaluate(ctx).unwrap_or_else(|err| {
            warn!(source = %self.source, error = %err, "expression failed, yielding null");
            Value::Null
        })
    }

    /// Evaluate as a condition.
    ///
    /// Non-boolean results pass, so an empty condition is `true`. Invalid
    /// expressions and evaluation errors are `false`.
    pub fn evaluate_condition(&self, ctx: &dyn EvalContext) -> bool {
        if let Some(err) = &self.error {
            warn!(source = %self.source, error = %err, "invalid condition treated as false");
            return false;
        }
        match self.try_evaluate(ctx) {
            Ok(value) => condition_passes(&value),
            Err(err) => {
                warn!(source = %self.source, error = %err, "condition failed, treated as false");
                false
            }
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("source", &self.source)
            .field("root", &self.root)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Tokenize, parse and compile `source`. `Ok(None)` for an empty source.
fn compile_source(
    source: &str,
    registry: &Registry,
) -> Result<Option<EvalNode>, ExpressionError> {
    let Some(ast) = vox_parse::parse_source(source, registry)? else {
        return Ok(None);
    };
    Ok(Some(compile(&ast, registry)?))
}

/// Compile and evaluate `source` in one step. An empty source is `Null`.
pub(crate) fn evaluate_source(
    source: &str,
    registry: &Registry,
    ctx: &dyn EvalContext,
) -> Result<Value, ExpressionError> {
    match compile_source(source, registry)? {
        Some(root) => Ok(root.evaluate(ctx)?),
        None => Ok(Value::Null),
    }
}

/// Evaluate a source string end to end against the standard registry.
pub fn evaluate_str(source: &str, ctx: &dyn EvalContext) -> Result<Value, ExpressionError> {
    evaluate_source(source, &Registry::standard(), ctx)
}

#[cfg(test)]
mod tests;
