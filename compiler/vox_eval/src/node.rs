//! Compiled evaluation tree.

use std::fmt;
use std::sync::Arc;

use vox_runtime::{EvalContext, EvalResult, FunctionInfo, OperatorInfo, Value};

/// A compiled expression node.
///
/// Registry entries are resolved during compilation and held by `Arc`.
/// Trees are immutable and may be evaluated from several threads at once.
#[derive(Clone)]
pub enum EvalNode {
    Const(Value),
    /// Field read from the evaluation context, brackets already stripped.
    FieldRef(Arc<str>),
    OperatorCall(Arc<OperatorInfo>, Vec<EvalNode>),
    FunctionCall(Arc<FunctionInfo>, Vec<EvalNode>),
}

impl EvalNode {
    pub fn field(name: &str) -> Self {
        EvalNode::FieldRef(Arc::from(name))
    }

    pub fn children(&self) -> &[EvalNode] {
        match self {
            EvalNode::Const(_) | EvalNode::FieldRef(_) => &[],
            EvalNode::OperatorCall(_, children) | EvalNode::FunctionCall(_, children) => children,
        }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        vox_stack::ensure_sufficient_stack(|| {
            1 + self.children().iter().map(EvalNode::node_count).sum::<usize>()
        })
    }

    #[inline]
    pub fn evaluate(&self, ctx: &dyn EvalContext) -> EvalResult {
        crate::eval::evaluate(self, ctx)
    }
}

/// S-expression form: `(+ 1.0f (* [hp] 2.0f))`.
impl fmt::Debug for EvalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, children) = match self {
            EvalNode::Const(value) => return write!(f, "{value:?}"),
            EvalNode::FieldRef(name) => return write!(f, "[{name}]"),
            EvalNode::OperatorCall(op, children) => (op.name(), children),
            EvalNode::FunctionCall(func, children) => (func.name(), children),
        };
        write!(f, "({name}")?;
        for child in children {
            write!(f, " {child:?}")?;
        }
        f.write_str(")")
    }
}
