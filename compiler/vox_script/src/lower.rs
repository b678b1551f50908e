//! Lowering of a flat prefix block array into evaluation trees.
//!
//! One cursor walks the array. Each top-level call consumes its own block
//! plus, recursively, the blocks of its arguments; the next top-level call
//! starts wherever the previous one stopped.

use tracing::{debug, trace};
use vox_eval::EvalNode;
use vox_runtime::{Callable, Value};
use vox_stack::{ensure_sufficient_stack, DepthLimit};

use crate::{Block, ScriptEnv, ScriptError};

pub(crate) fn lower_blocks(blocks: &[Block], env: &ScriptEnv<'_>) -> Result<Vec<EvalNode>, ScriptError> {
    let mut lowerer = Lowerer {
        blocks,
        cursor: 0,
        env,
        depth: DepthLimit::new(env.limits.max_depth),
    };
    let mut roots = Vec::new();
    while lowerer.cursor < blocks.len() {
        roots.push(lowerer.lower_next()?);
    }
    debug!(blocks = blocks.len(), roots = roots.len(), "lowered script");
    Ok(roots)
}

struct Lowerer<'a> {
    blocks: &'a [Block],
    cursor: usize,
    env: &'a ScriptEnv<'a>,
    depth: DepthLimit,
}

impl Lowerer<'_> {
    fn lower_next(&mut self) -> Result<EvalNode, ScriptError> {
        ensure_sufficient_stack(|| self.lower_block())
    }

    fn lower_block(&mut self) -> Result<EvalNode, ScriptError> {
        let index = self.cursor;
        let blocks = self.blocks;
        let Some(block) = blocks.get(index) else {
            return Err(ScriptError::Truncated { index });
        };
        self.cursor += 1;

        let node = match block {
            Block::Boolean(b) => EvalNode::Const(Value::Boolean(*b)),
            Block::String(s) => EvalNode::Const(Value::string(s)),
            Block::Integer(n) => EvalNode::Const(Value::Integer(*n)),
            Block::Float(x) => EvalNode::Const(Value::Float(*x)),
            Block::ObjectRef(id) => match self.env.objects.resolve(id) {
                Some(object) => EvalNode::Const(Value::Object(object)),
                None => {
                    return Err(ScriptError::UnknownObject {
                        index,
                        id: id.clone(),
                    })
                }
            },
            Block::Function(call) => {
                let Some(callable) = self.env.registry.find_callable(&call.name) else {
                    return Err(ScriptError::UnknownFunction {
                        index,
                        name: call.name.clone(),
                    });
                };
                let expected = callable.arity();
                let count = match call.arity.or_else(|| expected.fixed()) {
                    Some(count) => count,
                    None => {
                        return Err(ScriptError::ArityRequired {
                            index,
                            name: call.name.clone(),
                        })
                    }
                };
                if !expected.accepts(count) {
                    return Err(ScriptError::ArityMismatch {
                        index,
                        name: callable.name().to_string(),
                        expected,
                        got: count,
                    });
                }
                trace!(index, function = callable.name(), count, "lower call");

                self.depth.enter().map_err(|exceeded| ScriptError::TooDeep {
                    index,
                    limit: exceeded.limit,
                })?;
                let args = (0..count)
                    .map(|_| self.lower_next())
                    .collect::<Result<Vec<_>, _>>()?;
                self.depth.exit();

                match callable {
                    Callable::Function(func) => EvalNode::FunctionCall(func, args),
                    Callable::Operator(op) => EvalNode::OperatorCall(op, args),
                }
            }
        };
        Ok(node)
    }
}
