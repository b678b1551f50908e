//! Command handlers for the `vox` CLI.
//!
//! Each submodule implements one group of commands. Shared pieces, the
//! error type and `--field` parsing, live here in the module root.

use std::path::PathBuf;
use std::str::FromStr;

use vox_eval::{ExpressionError, MapContext, Value};
use vox_script::ScriptError;

mod debug;
mod eval;
mod script;

pub use debug::{lex_expression, parse_expression};
pub use eval::{eval_expression, interpolate_template};
pub use script::run_script_file;

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Syntax(#[from] vox_parse::SyntaxError),
    #[error(transparent)]
    Lex(#[from] vox_lexer::LexError),
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("`{path}` is not a valid script: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A `--field name=value` argument.
///
/// Values are typed by their spelling: `null`, `true` / `false`, integers,
/// floats, then dates; anything else is a string.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldArg {
    pub name: String,
    pub value: Value,
}

impl FromStr for FieldArg {
    type Err = String;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let Some((name, raw)) = arg.split_once('=') else {
            return Err(format!("expected NAME=VALUE, got `{arg}`"));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing field name in `{arg}`"));
        }
        Ok(FieldArg {
            name: name.to_string(),
            value: parse_field_value(raw),
        })
    }
}

fn parse_field_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Ok(b) = raw.to_ascii_lowercase().parse::<bool>() {
        return Value::Boolean(b);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(x) = raw.parse::<f64>() {
        return Value::Float(x);
    }
    match vox_runtime::ops::parse_date(raw) {
        Some(date) => Value::Date(date),
        None => Value::string(raw),
    }
}

/// `value (kind)`, spelling `Null` out.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null (null)".to_string(),
        other => format!("{other} ({})", other.kind()),
    }
}

fn context_from(fields: &[FieldArg]) -> MapContext {
    fields
        .iter()
        .map(|field| (field.name.clone(), field.value.clone()))
        .collect()
}
