//! The `eval` and `interp` commands.

use vox_eval::{evaluate_str, interpolate};

use super::{context_from, describe, CliError, FieldArg};

/// Evaluate and print `value (kind)`; an empty expression is `null`.
pub fn eval_expression(source: &str, fields: &[FieldArg]) -> Result<String, CliError> {
    let ctx = context_from(fields);
    let value = evaluate_str(source, &ctx)?;
    Ok(describe(&value))
}

pub fn interpolate_template(template: &str, fields: &[FieldArg]) -> String {
    interpolate(template, &context_from(fields))
}
