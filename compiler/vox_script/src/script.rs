//! Scripts, their compiled form and the host-facing runners.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vox_eval::EvalNode;
use vox_runtime::{EvalContext, Registry, Value};

use crate::lower::lower_blocks;
use crate::{Block, NoObjects, ObjectResolver, ScriptError};

/// Bounds applied while compiling a script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptLimits {
    /// Deepest allowed nesting of calls.
    pub max_depth: usize,
}

impl ScriptLimits {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
}

impl Default for ScriptLimits {
    fn default() -> Self {
        ScriptLimits {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Everything compilation resolves against.
#[derive(Copy, Clone)]
pub struct ScriptEnv<'a> {
    pub registry: &'a Registry,
    pub objects: &'a dyn ObjectResolver,
    pub limits: ScriptLimits,
}

impl<'a> ScriptEnv<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        ScriptEnv {
            registry,
            objects: &NoObjects,
            limits: ScriptLimits::default(),
        }
    }

    #[must_use]
    pub fn with_objects(mut self, objects: &'a dyn ObjectResolver) -> Self {
        self.objects = objects;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: ScriptLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// An authored script: the flat block array as stored in an asset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    blocks: Vec<Block>,
}

impl Script {
    pub fn new(blocks: Vec<Block>) -> Self {
        Script { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolve every call and object and build the evaluation trees.
    pub fn compile(&self, env: &ScriptEnv<'_>) -> Result<CompiledScript, ScriptError> {
        Ok(CompiledScript {
            roots: lower_blocks(&self.blocks, env)?,
        })
    }

    /// Compile and run every top-level call.
    pub fn execute(&self, env: &ScriptEnv<'_>, ctx: &dyn EvalContext) -> Result<(), ScriptError> {
        self.compile(env)?.execute(ctx)
    }
}

impl From<Vec<Block>> for Script {
    fn from(blocks: Vec<Block>) -> Self {
        Script::new(blocks)
    }
}

/// A script lowered to evaluation trees, one per top-level call.
///
/// Immutable; evaluate it as often as needed, from any thread.
#[derive(Clone, Debug, Default)]
pub struct CompiledScript {
    roots: Vec<EvalNode>,
}

impl CompiledScript {
    pub fn roots(&self) -> &[EvalNode] {
        &self.roots
    }

    /// Run every top-level subtree in order, discarding results.
    ///
    /// Stops at the first evaluation error.
    pub fn execute(&self, ctx: &dyn EvalContext) -> Result<(), ScriptError> {
        for root in &self.roots {
            root.evaluate(ctx)?;
        }
        Ok(())
    }

    /// Run top-level subtrees until one yields `false`.
    ///
    /// Subtrees after the first `false` are not evaluated. Non-boolean
    /// results are ignored, so an empty script or one made only of actions
    /// passes.
    pub fn evaluate_condition(&self, ctx: &dyn EvalContext) -> Result<bool, ScriptError> {
        for (position, root) in self.roots.iter().enumerate() {
            if matches!(root.evaluate(ctx)?, Value::Boolean(false)) {
                debug!(root = position, "condition short-circuited");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Run every subtree and return the last result, `Null` when empty.
    pub fn evaluate(&self, ctx: &dyn EvalContext) -> Result<Value, ScriptError> {
        let mut last = Value::Null;
        for root in &self.roots {
            last = root.evaluate(ctx)?;
        }
        Ok(last)
    }
}

/// Evaluate `script` as a condition.
///
/// Any failure, including an unknown function, makes the condition `false`.
pub fn evaluate_condition(script: &Script, env: &ScriptEnv<'_>, ctx: &dyn EvalContext) -> bool {
    match script
        .compile(env)
        .and_then(|compiled| compiled.evaluate_condition(ctx))
    {
        Ok(passed) => passed,
        Err(err) => {
            warn!(error = %err, "condition script failed, treated as false");
            false
        }
    }
}

/// Run `script` as an action. Failures are logged, never returned.
pub fn run_action(script: &Script, env: &ScriptEnv<'_>, ctx: &dyn EvalContext) {
    if let Err(err) = script.execute(env, ctx) {
        warn!(error = %err, "action script failed");
    }
}
