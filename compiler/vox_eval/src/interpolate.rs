//! `{expr}` interpolation inside plain text.

use memchr::memchr;
use tracing::warn;
use vox_runtime::{EvalContext, Registry};

use crate::expression::evaluate_source;

/// Substituted for a span that fails to compile or evaluate, and appended
/// in place of an unterminated `{`.
pub const ERROR_MARKER: &str = "<error>";

/// Replace every `{expr}` span in `template` with its evaluated text, using
/// the standard registry.
///
/// Text outside spans is copied unchanged. Spans do not nest: a span ends at
/// the first `}` after its `{`. An unterminated `{` appends
/// [`ERROR_MARKER`] and drops the rest of the template.
pub fn interpolate(template: &str, ctx: &dyn EvalContext) -> String {
    interpolate_with(template, &Registry::standard(), ctx)
}

pub fn interpolate_with(template: &str, registry: &Registry, ctx: &dyn EvalContext) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;

    while let Some(offset) = memchr(b'{', &bytes[copied..]) {
        let open = copied + offset;
        out.push_str(&template[copied..open]);

        let Some(length) = memchr(b'}', &bytes[open + 1..]) else {
            warn!(at = open, "unterminated interpolation span");
            out.push_str(ERROR_MARKER);
            return out;
        };
        let close = open + 1 + length;
        let source = &template[open + 1..close];
        match evaluate_source(source, registry, ctx) {
            Ok(value) => out.push_str(&value.as_string()),
            Err(err) => {
                warn!(expression = source, error = %err, "interpolation span failed");
                out.push_str(ERROR_MARKER);
            }
        }
        copied = close + 1;
    }

    out.push_str(&template[copied..]);
    out
}
