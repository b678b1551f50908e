//! Vox Script - structured block scripts.
//!
//! A script is authored as a flat array of typed [`Block`]s in prefix order:
//! a `Function` block is followed by the blocks of each of its arguments,
//! which may themselves be function calls. Scripts never run from the flat
//! array. [`Script::compile`] lowers each top-level call into the same
//! [`EvalNode`](vox_eval::EvalNode) tree that text expressions compile to,
//! so both encodings share one evaluator and one set of coercion rules.
//!
//! # Conditions and actions
//!
//! - [`CompiledScript::evaluate_condition`] runs top-level subtrees in order
//!   and stops at the first one that yields `false`; later subtrees do not
//!   run. Non-boolean results are ignored and an exhausted script passes.
//! - [`CompiledScript::execute`] always runs every top-level subtree.
//!
//! [`evaluate_condition`] and [`run_action`] wrap both for hosts: failures
//! are logged and degrade to `false` or a no-op.

mod block;
mod error;
mod lower;
mod objects;
mod script;

pub use block::{Block, FunctionBlock};
pub use error::ScriptError;
pub use objects::{NoObjects, ObjectResolver, ObjectTable};
pub use script::{
    evaluate_condition, run_action, CompiledScript, Script, ScriptEnv, ScriptLimits,
};
