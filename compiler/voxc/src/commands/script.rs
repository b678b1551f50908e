//! The `script` command.

use std::path::Path;

use tracing::debug;
use vox_eval::{EmptyContext, Registry};
use vox_script::{Script, ScriptEnv, ScriptLimits};

use super::{describe, CliError};

/// Load a JSON block array and run it.
///
/// As a condition the output is `true` or `false`; as an action it is the
/// result of the last top-level call.
pub fn run_script_file(path: &Path, condition: bool, max_depth: usize) -> Result<String, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let script: Script = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), blocks = script.blocks().len(), "loaded script");
    run_script(&script, condition, max_depth)
}

pub(crate) fn run_script(script: &Script, condition: bool, max_depth: usize) -> Result<String, CliError> {
    let registry = Registry::standard();
    let env = ScriptEnv::new(&registry).with_limits(ScriptLimits { max_depth });
    let compiled = script.compile(&env)?;
    if condition {
        Ok(compiled.evaluate_condition(&EmptyContext)?.to_string())
    } else {
        Ok(describe(&compiled.evaluate(&EmptyContext)?))
    }
}
