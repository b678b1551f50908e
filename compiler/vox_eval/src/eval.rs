//! Tree-walking evaluation.

use smallvec::SmallVec;
use tracing::trace;
use vox_runtime::{EvalContext, EvalError, EvalResult, Value};
use vox_stack::ensure_sufficient_stack;

use crate::EvalNode;

/// Argument buffer; most calls take at most three operands.
type Args = SmallVec<[Value; 4]>;

/// Evaluate `node` against `ctx`.
///
/// Arguments are evaluated eagerly and left to right before the bound
/// routine runs, so `and` / `or` evaluate both sides.
pub fn evaluate(node: &EvalNode, ctx: &dyn EvalContext) -> EvalResult {
    ensure_sufficient_stack(|| match node {
        EvalNode::Const(value) => Ok(value.clone()),
        EvalNode::FieldRef(name) => Ok(ctx.get_field(name)),
        EvalNode::OperatorCall(op, children) => {
            let args = evaluate_args(children, ctx)?;
            op.call(ctx, &args)
        }
        EvalNode::FunctionCall(func, children) => {
            let args = evaluate_args(children, ctx)?;
            trace!(function = func.name(), args = args.len(), "call");
            func.call(ctx, &args)
        }
    })
}

fn evaluate_args(children: &[EvalNode], ctx: &dyn EvalContext) -> Result<Args, EvalError> {
    children.iter().map(|child| evaluate(child, ctx)).collect()
}

/// Read a condition result: non-boolean values pass.
#[inline]
pub fn condition_passes(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        _ => true,
    }
}
